//! Caching layer for image searches

pub mod fetcher;
pub mod image_cache;

pub use fetcher::ImageFetcher;
pub use image_cache::ImageCache;
