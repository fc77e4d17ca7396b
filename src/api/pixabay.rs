//! Pixabay image search client
//!
//! Uses async reqwest. Every await point also watches a cancellation token so
//! a superseded search stops as soon as possible.

use crate::error::{Result, TrainerError};
use crate::models::ImagePair;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_BASE_URL: &str = "https://pixabay.com/api/";

/// Maximum number of images returned per word
pub const RESULTS_PER_PAGE: usize = 4;

/// Response language for search terms
pub const SEARCH_LANGUAGE: &str = "ru";

const USER_AGENT: &str = "BLD-Trainer/1.0";

/// Pixabay search response
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<Hit>,
    #[serde(default, rename = "totalHits")]
    pub total_hits: u64,
}

#[derive(Debug, Deserialize)]
pub struct Hit {
    /// Medium size image (640px)
    #[serde(rename = "webformatURL")]
    pub webformat_url: String,
    /// Small preview (150px)
    #[serde(rename = "previewURL")]
    pub preview_url: String,
}

impl SearchResponse {
    /// Up to [`RESULTS_PER_PAGE`] image pairs, in result order
    pub fn image_pairs(self) -> Vec<ImagePair> {
        self.hits
            .into_iter()
            .take(RESULTS_PER_PAGE)
            .map(|hit| ImagePair {
                high: hit.webformat_url,
                low: hit.preview_url,
            })
            .collect()
    }
}

pub struct PixabayClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PixabayClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the search URL. The word is sent as typed, only URL-encoded.
    pub fn search_url(&self, word: &str) -> String {
        format!(
            "{}?key={}&q={}&image_type=photo&per_page={}&safesearch=true&lang={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(word),
            RESULTS_PER_PAGE,
            SEARCH_LANGUAGE
        )
    }

    /// Search photos for a word.
    ///
    /// Returns [`TrainerError::Cancelled`] if `cancel` fires before the
    /// response body has been decoded.
    pub async fn search(&self, word: &str, cancel: &CancellationToken) -> Result<Vec<ImagePair>> {
        log::debug!("Searching Pixabay for '{}'", word);

        let request = self
            .client
            .get(self.search_url(word))
            .header("User-Agent", USER_AGENT)
            .send();

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(TrainerError::Cancelled),
            response = request => response?,
        };

        if !response.status().is_success() {
            return Err(TrainerError::HttpStatus(response.status()));
        }

        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(TrainerError::Cancelled),
            body = response.json::<SearchResponse>() => body?,
        };

        log::debug!(
            "Pixabay returned {} hits ({} total) for '{}'",
            body.hits.len(),
            body.total_hits,
            word
        );
        Ok(body.image_pairs())
    }
}

#[cfg(test)]
#[path = "pixabay_tests.rs"]
mod tests;
