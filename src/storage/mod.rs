//! Key-value storage shared by the image cache, settings and theme.
//!
//! Two backends:
//! - [`MemoryStore`]: process-local map, lost on restart
//! - [`SqliteStore`]: one SQLite file, values survive restarts
//!
//! Stores are namespaced so several consumers can share one database.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::Result;

/// Namespace for cached image search results
pub const IMAGES_NAMESPACE: &str = "images";

/// Namespace for settings and theme
pub const PREFERENCES_NAMESPACE: &str = "preferences";

/// String key-value storage
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under a key
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove every key in this store
    fn clear(&self) -> Result<()>;
}
