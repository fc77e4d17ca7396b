//! User settings and theme, persisted in a key-value store.
//!
//! Settings are one JSON record under [`SETTINGS_KEY`], loaded once and
//! validated field by field over the defaults. The theme is the literal
//! `"dark"` or `"light"` under [`THEME_KEY`]. Changes are saved immediately
//! and published on a watch channel. Storage failures are logged only.

use crate::error::{Result, TrainerError};
use crate::models::{ImageQuality, Mode, Settings, Theme};
use crate::storage::KeyValueStore;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::watch;

pub const SETTINGS_KEY: &str = "bld-trainer-settings";
pub const THEME_KEY: &str = "bld-trainer-theme";

/// A single settings change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingUpdate {
    ShowImages(bool),
    ImageQuality(ImageQuality),
    CurrentMode(Mode),
}

impl SettingUpdate {
    /// Parse a `key value` pair as typed on the command line
    pub fn parse(key: &str, value: &str) -> Result<Self> {
        let invalid = |e: String| TrainerError::Config(format!("{}: {}", key, e));
        match key {
            "showImages" | "show-images" => value
                .trim()
                .parse::<bool>()
                .map(SettingUpdate::ShowImages)
                .map_err(|e| invalid(e.to_string())),
            "imageQuality" | "image-quality" => value
                .parse::<ImageQuality>()
                .map(SettingUpdate::ImageQuality)
                .map_err(invalid),
            "currentMode" | "current-mode" | "mode" => value
                .parse::<Mode>()
                .map(SettingUpdate::CurrentMode)
                .map_err(invalid),
            other => Err(TrainerError::Config(format!("unknown setting: {}", other))),
        }
    }

    fn apply(self, settings: &mut Settings) {
        match self {
            SettingUpdate::ShowImages(v) => settings.show_images = v,
            SettingUpdate::ImageQuality(v) => settings.image_quality = v,
            SettingUpdate::CurrentMode(v) => settings.current_mode = v,
        }
    }
}

fn field<T: DeserializeOwned>(key: &str, value: serde_json::Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("Ignoring invalid value for setting '{}': {}", key, e);
            None
        }
    }
}

/// Validate a stored settings record. Valid known fields override the
/// defaults; unknown fields and invalid values are dropped.
pub fn parse_settings(raw: &str) -> Settings {
    let mut settings = Settings::default();

    let map = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(map)) => map,
        Ok(_) => {
            log::warn!("Stored settings are not a JSON object, using defaults");
            return settings;
        }
        Err(e) => {
            log::warn!("Failed to parse stored settings, using defaults: {}", e);
            return settings;
        }
    };

    for (key, value) in map {
        match key.as_str() {
            "showImages" => {
                if let Some(v) = field(&key, value) {
                    settings.show_images = v;
                }
            }
            "imageQuality" => {
                if let Some(v) = field(&key, value) {
                    settings.image_quality = v;
                }
            }
            "currentMode" => {
                if let Some(v) = field(&key, value) {
                    settings.current_mode = v;
                }
            }
            other => log::warn!("Ignoring unknown setting '{}'", other),
        }
    }

    settings
}

pub struct SettingsStore {
    store: Arc<dyn KeyValueStore>,
    sender: watch::Sender<Settings>,
}

impl SettingsStore {
    /// Load settings from the store, falling back to defaults
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let settings = match store.get(SETTINGS_KEY) {
            Ok(Some(raw)) => parse_settings(&raw),
            Ok(None) => Settings::default(),
            Err(e) => {
                log::error!("Error loading settings: {}", e);
                Settings::default()
            }
        };
        log::debug!("Loaded settings: {:?}", settings);

        let (sender, _) = watch::channel(settings);
        Self { store, sender }
    }

    /// Current settings
    pub fn get(&self) -> Settings {
        self.sender.borrow().clone()
    }

    /// Receive every future settings change
    pub fn subscribe(&self) -> watch::Receiver<Settings> {
        self.sender.subscribe()
    }

    /// Apply one change and save the whole record
    pub fn update(&self, update: SettingUpdate) {
        self.sender.send_modify(|settings| update.apply(settings));
        self.save();
    }

    fn save(&self) {
        let settings = self.get();
        let result = serde_json::to_string(&settings)
            .map_err(TrainerError::from)
            .and_then(|json| self.store.set(SETTINGS_KEY, &json));
        if let Err(e) = result {
            log::error!("Error saving settings: {}", e);
        }
    }
}

pub struct ThemeStore {
    store: Arc<dyn KeyValueStore>,
    sender: watch::Sender<Theme>,
}

impl ThemeStore {
    /// Load the theme from the store, defaulting to dark
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let theme = match store.get(THEME_KEY) {
            Ok(stored) => Theme::from_stored(stored.as_deref()),
            Err(e) => {
                log::error!("Error loading theme: {}", e);
                Theme::default()
            }
        };

        let (sender, _) = watch::channel(theme);
        Self { store, sender }
    }

    pub fn current(&self) -> Theme {
        *self.sender.borrow()
    }

    /// Receive every future theme change
    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.sender.subscribe()
    }

    /// Switch between dark and light, returning the new theme
    pub fn toggle(&self) -> Theme {
        let theme = self.current().toggled();
        self.set(theme);
        theme
    }

    pub fn set(&self, theme: Theme) {
        self.sender.send_replace(theme);
        if let Err(e) = self.store.set(THEME_KEY, theme.as_str()) {
            log::error!("Error saving theme: {}", e);
        }
    }
}
