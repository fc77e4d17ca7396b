pub mod api;
pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod picker;
pub mod processor;
pub mod settings;
pub mod storage;

// Re-export commonly used items
pub use api::PixabayClient;
pub use app::{Backend, Trainer};
pub use cache::{ImageCache, ImageFetcher};
pub use config::Config;
pub use error::{Result, TrainerError};
pub use io::{parse_csv, read_csv, DataSource, TrainingData};
pub use models::{DrillPair, DrillRow, DrillValue, ImagePair, ImageQuality, Mode, Settings, Theme};
pub use picker::PairPicker;
pub use processor::process;
pub use settings::{SettingUpdate, SettingsStore, ThemeStore};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
