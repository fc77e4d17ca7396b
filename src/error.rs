use thiserror::Error;

use crate::models::Mode;

/// Unified error type for network, storage and data operations
#[derive(Debug, Error)]
pub enum TrainerError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Failed to parse or serialize JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Failed to parse CSV data
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Key-value store operation failed
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The request was superseded or cancelled before it completed
    #[error("Request cancelled")]
    Cancelled,
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
    /// No drill table is loaded for the mode
    #[error("No data loaded for {0} mode")]
    NoData(Mode),
}

impl TrainerError {
    /// True when the error only signals cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TrainerError::Cancelled)
    }
}

/// Result alias for trainer operations
pub type Result<T> = std::result::Result<T, TrainerError>;
