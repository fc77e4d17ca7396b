//! Runtime configuration from environment variables.
//!
//! | Variable            | Meaning                                  |
//! |---------------------|------------------------------------------|
//! | `PIXABAY_API_KEY`   | Pixabay API key (images disabled if unset)|
//! | `PIXABAY_BASE_URL`  | Override the Pixabay endpoint            |
//! | `WORDS_CSV_URL`     | CSV source (URL or path) for words       |
//! | `EDGES_CSV_URL`     | CSV source for edges                     |
//! | `CORNERS_CSV_URL`   | CSV source for corners                   |
//! | `*_SHEET_URL`       | Editable spreadsheet link per mode       |

use crate::api::pixabay::DEFAULT_BASE_URL;
use crate::error::{Result, TrainerError};
use crate::io::DataSource;
use crate::models::Mode;
use std::collections::HashMap;
use std::path::PathBuf;

/// Per-mode data locations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeConfig {
    pub csv_source: Option<DataSource>,
    pub sheet_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub pixabay_api_key: Option<String>,
    pub pixabay_base_url: String,
    modes: HashMap<Mode, ModeConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pixabay_api_key: None,
            pixabay_base_url: DEFAULT_BASE_URL.to_string(),
            modes: HashMap::new(),
        }
    }
}

fn env_prefix(mode: Mode) -> &'static str {
    match mode {
        Mode::Words => "WORDS",
        Mode::Edges => "EDGES",
        Mode::Corners => "CORNERS",
    }
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through a variable lookup function
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let modes = Mode::all()
            .iter()
            .map(|&mode| {
                let prefix = env_prefix(mode);
                let config = ModeConfig {
                    csv_source: get(&format!("{}_CSV_URL", prefix)).map(|s| DataSource::parse(&s)),
                    sheet_url: get(&format!("{}_SHEET_URL", prefix)),
                };
                (mode, config)
            })
            .collect();

        Self {
            pixabay_api_key: get("PIXABAY_API_KEY"),
            pixabay_base_url: get("PIXABAY_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            modes,
        }
    }

    pub fn mode(&self, mode: Mode) -> ModeConfig {
        self.modes.get(&mode).cloned().unwrap_or_default()
    }

    /// Configured CSV source for a mode
    pub fn csv_source(&self, mode: Mode) -> Result<DataSource> {
        self.modes
            .get(&mode)
            .and_then(|m| m.csv_source.clone())
            .ok_or_else(|| {
                TrainerError::Config(format!(
                    "no CSV source for {} mode (set {}_CSV_URL)",
                    mode,
                    env_prefix(mode)
                ))
            })
    }

    pub fn set_csv_source(&mut self, mode: Mode, source: DataSource) {
        self.modes.entry(mode).or_default().csv_source = Some(source);
    }

    pub fn sheet_url(&self, mode: Mode) -> Option<&str> {
        self.modes.get(&mode).and_then(|m| m.sheet_url.as_deref())
    }
}

/// Returns the default database path: ~/.local/share/bld_trainer/trainer.db
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bld_trainer")
        .join("trainer.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.pixabay_api_key, None);
        assert_eq!(config.pixabay_base_url, DEFAULT_BASE_URL);
        assert!(config.csv_source(Mode::Words).is_err());
        assert_eq!(config.sheet_url(Mode::Edges), None);
    }

    #[test]
    fn reads_mode_sources() {
        let config = Config::from_lookup(lookup(&[
            ("PIXABAY_API_KEY", "secret"),
            ("WORDS_CSV_URL", "https://example.com/words.csv"),
            ("EDGES_CSV_URL", "data/edges.csv"),
            ("CORNERS_SHEET_URL", "https://example.com/sheet"),
        ]));

        assert_eq!(config.pixabay_api_key.as_deref(), Some("secret"));
        assert_eq!(
            config.csv_source(Mode::Words).unwrap(),
            DataSource::Url("https://example.com/words.csv".into())
        );
        assert_eq!(
            config.csv_source(Mode::Edges).unwrap(),
            DataSource::Path(PathBuf::from("data/edges.csv"))
        );
        assert!(config.csv_source(Mode::Corners).is_err());
        assert_eq!(
            config.sheet_url(Mode::Corners),
            Some("https://example.com/sheet")
        );
    }

    #[test]
    fn blank_values_are_unset() {
        let config = Config::from_lookup(lookup(&[("PIXABAY_API_KEY", "  "), ("WORDS_CSV_URL", "")]));
        assert_eq!(config.pixabay_api_key, None);
        assert!(config.csv_source(Mode::Words).is_err());
    }

    #[test]
    fn missing_source_error_names_variable() {
        let err = Config::default().csv_source(Mode::Corners).unwrap_err();
        assert!(err.to_string().contains("CORNERS_CSV_URL"));
    }

    #[test]
    fn set_csv_source_overrides() {
        let mut config = Config::default();
        config.set_csv_source(Mode::Edges, DataSource::parse("edges.csv"));
        assert_eq!(
            config.csv_source(Mode::Edges).unwrap(),
            DataSource::Path(PathBuf::from("edges.csv"))
        );
        assert_eq!(config.mode(Mode::Edges).sheet_url, None);
    }

    #[test]
    fn default_db_path_ends_with_file_name() {
        assert!(default_db_path().ends_with("bld_trainer/trainer.db"));
    }
}
