//! BLD Trainer - letter-pair drills on the command line
//!
//! Loads drill tables from CSV, prints random pairs and looks up image hints.

use bld_trainer::config::default_db_path;
use bld_trainer::{Backend, Config, DataSource, Mode, Result, SettingUpdate, Trainer};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Letter-pair drill trainer
#[derive(Parser, Debug)]
#[command(name = "bld_trainer")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database holding settings and the image cache
    #[arg(short, long, default_value_t = default_db_path().to_string_lossy().to_string())]
    database: String,

    /// Keep settings and the image cache in memory only
    #[arg(long, default_value_t = false)]
    memory: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print random drill pairs
    Drill {
        /// Mode to drill (words, edges, corners); defaults to the saved mode
        #[arg(short, long)]
        mode: Option<Mode>,

        /// Number of pairs to print
        #[arg(short, long, default_value_t = 5)]
        count: usize,

        /// CSV URL or file overriding the configured source
        #[arg(short, long)]
        source: Option<String>,
    },
    /// Print image URLs for a word
    Images {
        word: String,
    },
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
    /// Show or toggle the theme
    Theme {
        #[arg(long, default_value_t = false)]
        toggle: bool,
    },
    /// Remove every cached image search
    ClearCache,
    /// List modes and their data sources
    Modes,
}

#[derive(Subcommand, Debug)]
enum SettingsAction {
    /// Print the current settings
    Show,
    /// Change one setting (showImages, imageQuality, currentMode)
    Set { key: String, value: String },
}

#[tokio::main]
async fn main() {
    // Initialize logger. Set RUST_LOG environment variable to control log level.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        log::error!("Application error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let backend = if args.memory {
        Backend::Memory
    } else {
        Backend::Sqlite(PathBuf::from(&args.database))
    };
    let mut trainer = Trainer::open(Config::from_env(), &backend)?;

    match args.command {
        Command::Drill {
            mode,
            count,
            source,
        } => drill(&mut trainer, mode, count, source).await,
        Command::Images { word } => {
            let images = trainer.images_for_word(&word).await?;
            if images.is_empty() {
                println!("No images for '{}'", word);
            }
            let quality = trainer.settings().get().image_quality;
            for image in images {
                println!("{}", image.url(quality));
            }
            Ok(())
        }
        Command::Settings { action } => {
            if let Some(SettingsAction::Set { key, value }) = action {
                trainer.settings().update(SettingUpdate::parse(&key, &value)?);
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&trainer.settings().get())?
            );
            Ok(())
        }
        Command::Theme { toggle } => {
            let theme = if toggle {
                trainer.theme().toggle()
            } else {
                trainer.theme().current()
            };
            println!("{}", theme.as_str());
            Ok(())
        }
        Command::ClearCache => {
            trainer.clear_cache()?;
            println!("Image cache cleared");
            Ok(())
        }
        Command::Modes => {
            for &mode in Mode::all() {
                let config = trainer.config().mode(mode);
                let source = config
                    .csv_source
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "(not configured)".to_string());
                println!("{:<8} {:<8} {}", mode.as_str(), mode.label(), source);
                if let Some(sheet) = config.sheet_url {
                    println!("{:<17} sheet: {}", "", sheet);
                }
            }
            Ok(())
        }
    }
}

async fn drill(
    trainer: &mut Trainer,
    mode: Option<Mode>,
    count: usize,
    source: Option<String>,
) -> Result<()> {
    let mode = mode.unwrap_or_else(|| trainer.current_mode());
    if let Some(source) = source {
        trainer.set_csv_source(mode, DataSource::parse(&source));
    }

    trainer.switch_mode(mode).await?;
    println!("{} drill", mode.label());

    for _ in 0..count {
        let Some(pair) = trainer.next_pair()? else {
            println!("No usable pairs in the {} table", mode);
            break;
        };
        let value = trainer.value_of(&pair);
        let detail = if mode.has_algorithm() {
            value.algorithm
        } else {
            value.word
        };
        println!("{}  {}", pair.pair, detail);

        for url in trainer.images_for(&pair).await {
            println!("    {}", url);
        }
    }
    Ok(())
}
