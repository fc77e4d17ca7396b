//! Trainer application root.
//!
//! Owns the stores, loaders, picker and image fetcher and wires them
//! together; front-ends only talk to [`Trainer`].

use crate::api::PixabayClient;
use crate::cache::{ImageCache, ImageFetcher};
use crate::config::Config;
use crate::error::{Result, TrainerError};
use crate::io::{DataSource, TrainingData};
use crate::models::{DrillPair, DrillRow, DrillValue, ImagePair, Mode};
use crate::picker::PairPicker;
use crate::settings::{SettingUpdate, SettingsStore, ThemeStore};
use crate::storage::{
    KeyValueStore, MemoryStore, SqliteStore, IMAGES_NAMESPACE, PREFERENCES_NAMESPACE,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Minimum number of picks tried before giving up on a table
const MIN_PICK_ATTEMPTS: usize = 10;

/// Where the trainer keeps its cache and preferences
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Memory,
    Sqlite(PathBuf),
}

pub struct Trainer {
    config: Config,
    settings: SettingsStore,
    theme: ThemeStore,
    image_cache: ImageCache,
    fetcher: Option<ImageFetcher>,
    data: TrainingData,
    picker: PairPicker,
    tables: HashMap<Mode, Vec<DrillRow>>,
}

impl Trainer {
    /// Open the trainer on a storage backend
    pub fn open(config: Config, backend: &Backend) -> Result<Self> {
        let (images, preferences): (Arc<dyn KeyValueStore>, Arc<dyn KeyValueStore>) =
            match backend {
                Backend::Memory => (Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new())),
                Backend::Sqlite(path) => {
                    let images = SqliteStore::open(path, IMAGES_NAMESPACE)?;
                    let preferences = images.namespace(PREFERENCES_NAMESPACE);
                    (Arc::new(images), Arc::new(preferences))
                }
            };
        Ok(Self::with_stores(config, images, preferences))
    }

    /// Build the trainer on explicit stores
    pub fn with_stores(
        config: Config,
        images: Arc<dyn KeyValueStore>,
        preferences: Arc<dyn KeyValueStore>,
    ) -> Self {
        let image_cache = ImageCache::new(images);
        let fetcher = match &config.pixabay_api_key {
            Some(key) => Some(ImageFetcher::new(
                PixabayClient::with_base_url(key.clone(), config.pixabay_base_url.clone()),
                image_cache.clone(),
            )),
            None => {
                log::warn!("PIXABAY_API_KEY not set, image search disabled");
                None
            }
        };

        Self {
            settings: SettingsStore::load(Arc::clone(&preferences)),
            theme: ThemeStore::load(preferences),
            image_cache,
            fetcher,
            data: TrainingData::new(),
            picker: PairPicker::new(),
            tables: HashMap::new(),
            config,
        }
    }

    /// Replace the pair picker, e.g. with a seeded one
    pub fn with_picker(mut self, picker: PairPicker) -> Self {
        self.picker = picker;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn theme(&self) -> &ThemeStore {
        &self.theme
    }

    pub fn training_data(&self) -> &TrainingData {
        &self.data
    }

    /// Image fetcher, if an API key is configured
    pub fn fetcher(&self) -> Option<&ImageFetcher> {
        self.fetcher.as_ref()
    }

    pub fn current_mode(&self) -> Mode {
        self.settings.get().current_mode
    }

    pub fn is_loaded(&self, mode: Mode) -> bool {
        self.tables.contains_key(&mode)
    }

    pub fn table(&self, mode: Mode) -> Option<&[DrillRow]> {
        self.tables.get(&mode).map(Vec::as_slice)
    }

    /// Point a mode at another CSV source; its table is reloaded on next use
    pub fn set_csv_source(&mut self, mode: Mode, source: DataSource) {
        self.config.set_csv_source(mode, source);
        self.tables.remove(&mode);
    }

    /// Load (or reload) the table for a mode from its configured source
    pub async fn load_mode(&mut self, mode: Mode) -> Result<usize> {
        let source = self.config.csv_source(mode)?;
        let rows = self.data.load(mode, &source).await?;
        let count = rows.len();
        self.tables.insert(mode, rows);
        Ok(count)
    }

    /// Make a mode current, loading its table on first use.
    ///
    /// The saved mode only changes once the table is loaded.
    pub async fn switch_mode(&mut self, mode: Mode) -> Result<()> {
        if !self.is_loaded(mode) {
            self.load_mode(mode).await?;
        }
        self.settings.update(SettingUpdate::CurrentMode(mode));
        Ok(())
    }

    /// Random pair from the current mode's table.
    ///
    /// Rows without usable pairs are skipped by picking again; `Ok(None)`
    /// means no usable pair turned up.
    pub fn next_pair(&mut self) -> Result<Option<DrillPair>> {
        let mode = self.current_mode();
        let rows = self.tables.get(&mode).ok_or(TrainerError::NoData(mode))?;

        let attempts = (rows.len() * 2).max(MIN_PICK_ATTEMPTS);
        for _ in 0..attempts {
            if let Some(pair) = self.picker.pick(rows, mode) {
                return Ok(Some(pair));
            }
        }

        log::warn!("No usable pair found in {} table after {} picks", mode, attempts);
        Ok(None)
    }

    /// Word or algorithm for a pair of the current mode
    pub fn value_of(&self, pair: &DrillPair) -> DrillValue {
        DrillValue::parse(&pair.value, self.current_mode().has_algorithm())
    }

    /// Image search for a word through the shared cache
    pub async fn images_for_word(&self, word: &str) -> Result<Vec<ImagePair>> {
        let fetcher = self
            .fetcher
            .as_ref()
            .ok_or_else(|| TrainerError::Config("PIXABAY_API_KEY is not set".into()))?;
        Ok(fetcher.fetch_images(word).await)
    }

    /// Image URLs for a pair in the configured quality.
    ///
    /// Empty unless images are enabled and the pair value is a word.
    pub async fn images_for(&self, pair: &DrillPair) -> Vec<String> {
        let settings = self.settings.get();
        if !settings.show_images {
            return Vec::new();
        }
        let value = self.value_of(pair);
        if value.word.is_empty() {
            return Vec::new();
        }
        let Some(fetcher) = &self.fetcher else {
            return Vec::new();
        };

        fetcher
            .fetch_images(&value.word)
            .await
            .iter()
            .map(|image| image.url(settings.image_quality).to_string())
            .collect()
    }

    /// Remove every cached image search
    pub fn clear_cache(&self) -> Result<()> {
        self.image_cache.clear()
    }
}
