use crate::models::ImagePair;
use crate::storage::KeyValueStore;
use std::sync::Arc;

/// Cache of image search results keyed by normalized word.
///
/// An empty list is a valid entry: the word is known to have no images.
/// Entries never expire.
#[derive(Clone)]
pub struct ImageCache {
    store: Arc<dyn KeyValueStore>,
}

impl ImageCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Normalize a word into its cache key
    pub fn key(word: &str) -> String {
        word.trim().to_lowercase()
    }

    /// Get cached images for a key. Read failures count as a miss.
    pub fn get(&self, key: &str) -> Option<Vec<ImagePair>> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Failed to read image cache for '{}': {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(images) => Some(images),
            Err(e) => {
                log::warn!("Failed to parse cached images for '{}': {}", key, e);
                None
            }
        }
    }

    /// Store images for a key
    pub fn insert(&self, key: &str, images: &[ImagePair]) {
        let json = match serde_json::to_string(images) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize images for '{}': {}", key, e);
                return;
            }
        };
        if let Err(e) = self.store.set(key, &json) {
            log::warn!("Failed to cache images for '{}': {}", key, e);
        } else {
            log::debug!("Cached {} images for '{}'", images.len(), key);
        }
    }

    /// Check if a key is cached
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove all cached entries
    pub fn clear(&self) -> crate::error::Result<()> {
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, SqliteStore};

    fn sample_images() -> Vec<ImagePair> {
        vec![
            ImagePair {
                high: "https://example.com/1_640.jpg".into(),
                low: "https://example.com/1_150.jpg".into(),
            },
            ImagePair {
                high: "https://example.com/2_640.jpg".into(),
                low: "https://example.com/2_150.jpg".into(),
            },
        ]
    }

    #[test]
    fn key_is_trimmed_and_lowercased() {
        assert_eq!(ImageCache::key("  Кот "), "кот");
        assert_eq!(ImageCache::key("DOG"), "dog");
        assert_eq!(ImageCache::key("   "), "");
    }

    #[test]
    fn get_missing_returns_none() {
        let cache = ImageCache::new(Arc::new(MemoryStore::new()));
        assert!(cache.get("кот").is_none());
        assert!(!cache.contains("кот"));
    }

    #[test]
    fn insert_and_get_preserves_order() {
        let cache = ImageCache::new(Arc::new(MemoryStore::new()));
        cache.insert("кот", &sample_images());
        assert_eq!(cache.get("кот"), Some(sample_images()));
    }

    #[test]
    fn empty_entry_is_a_hit() {
        let cache = ImageCache::new(Arc::new(MemoryStore::new()));
        cache.insert("ъ", &[]);
        assert_eq!(cache.get("ъ"), Some(vec![]));
        assert!(cache.contains("ъ"));
    }

    #[test]
    fn corrupt_entry_is_a_miss() {
        let store = Arc::new(MemoryStore::new());
        store.set("кот", "not json").unwrap();
        let cache = ImageCache::new(store);
        assert!(cache.get("кот").is_none());
    }

    #[test]
    fn clear_empties_cache() {
        let cache = ImageCache::new(Arc::new(MemoryStore::new()));
        cache.insert("кот", &sample_images());
        cache.clear().unwrap();
        assert!(cache.get("кот").is_none());
    }

    #[test]
    fn works_on_sqlite_backend() {
        let store = SqliteStore::open_in_memory("images").unwrap();
        let cache = ImageCache::new(Arc::new(store.clone()));
        cache.insert("кот", &sample_images());

        assert_eq!(cache.get("кот"), Some(sample_images()));
        assert_eq!(store.len().unwrap(), 1);

        cache.clear().unwrap();
        assert_eq!(store.len().unwrap(), 0);
    }
}
