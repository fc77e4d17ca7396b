//! Cache-first image lookup with last-writer-wins cancellation.
//!
//! - A cache hit (including a cached empty list) never touches the network.
//! - Each fetcher has at most one search in flight; starting a new one
//!   cancels the previous one, whose result is then dropped uncached.
//! - Failed searches are cached as empty lists and never retried.

use super::ImageCache;
use crate::api::PixabayClient;
use crate::models::ImagePair;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tokio_util::sync::CancellationToken;

struct InFlight {
    id: u64,
    token: CancellationToken,
}

/// Clears the in-flight slot when its search ends or is dropped
struct InFlightGuard<'a> {
    fetcher: &'a ImageFetcher,
    id: u64,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut current = self
            .fetcher
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if current.as_ref().is_some_and(|c| c.id == self.id) {
            *current = None;
        }
    }
}

pub struct ImageFetcher {
    client: PixabayClient,
    cache: ImageCache,
    current: Mutex<Option<InFlight>>,
    next_id: AtomicU64,
}

impl ImageFetcher {
    pub fn new(client: PixabayClient, cache: ImageCache) -> Self {
        Self {
            client,
            cache,
            current: Mutex::new(None),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    /// True while a network search is running
    pub fn is_loading(&self) -> bool {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Cancel the running search, if any
    pub fn cancel_fetch(&self) {
        let previous = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(previous) = previous {
            log::debug!("Cancelling image search #{}", previous.id);
            previous.token.cancel();
        }
    }

    /// Remove every cached search result
    pub fn clear_cache(&self) -> crate::error::Result<()> {
        self.cache.clear()
    }

    /// Fetch up to four images for a word, checking the cache first.
    ///
    /// A word that is empty after trimming yields no images without a
    /// cache lookup, a cache write or a network request.
    pub async fn fetch_images(&self, word: &str) -> Vec<ImagePair> {
        let key = ImageCache::key(word);
        if key.is_empty() {
            return Vec::new();
        }

        if let Some(images) = self.cache.get(&key) {
            log::debug!("Image cache hit for '{}' ({} images)", key, images.len());
            return images;
        }

        log::info!("Image cache miss for '{}', searching Pixabay", key);
        let (guard, token) = self.begin();
        let result = self.client.search(word, &token).await;
        drop(guard);

        if token.is_cancelled() {
            log::debug!("Discarding superseded image search for '{}'", key);
            return Vec::new();
        }

        match result {
            Ok(images) => {
                self.cache.insert(&key, &images);
                images
            }
            Err(e) if e.is_cancelled() => Vec::new(),
            Err(e) => {
                log::error!("Error fetching images for '{}': {}", word, e);
                self.cache.insert(&key, &[]);
                Vec::new()
            }
        }
    }

    /// Register a new search, cancelling the one it supersedes
    fn begin(&self) -> (InFlightGuard<'_>, CancellationToken) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let token = CancellationToken::new();

        let previous = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(InFlight {
                id,
                token: token.clone(),
            });
        if let Some(previous) = previous {
            log::debug!("Image search #{} superseded by #{}", previous.id, id);
            previous.token.cancel();
        }

        (InFlightGuard { fetcher: self, id }, token)
    }
}

#[cfg(test)]
#[path = "fetcher_tests.rs"]
mod tests;
