//! API clients for external services (Pixabay image search)

pub mod pixabay;

pub use pixabay::{PixabayClient, SearchResponse};
