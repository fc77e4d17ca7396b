//! CSV loading for drill tables.

use crate::error::{Result, TrainerError};
use crate::models::{DrillRow, Mode, RawRow};
use crate::processor::process;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

/// Where a drill table comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    Path(PathBuf),
}

impl DataSource {
    /// `http(s)://` sources are URLs, anything else is a file path
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            DataSource::Url(source.to_string())
        } else {
            DataSource::Path(PathBuf::from(source))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => f.write_str(url),
            DataSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

fn parse_reader<R: std::io::Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut rows = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let cells = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.to_string(), cell.to_string()))
            .collect();
        rows.push(RawRow::new(cells));
    }

    Ok(rows)
}

/// Parse CSV text with a header row into raw rows
pub fn parse_csv(text: &str) -> Result<Vec<RawRow>> {
    parse_reader(text.as_bytes())
}

/// Read a CSV file with a header row into raw rows
pub fn read_csv(path: &Path) -> Result<Vec<RawRow>> {
    let file = File::open(path)?;
    parse_reader(file)
}

/// Download CSV text
pub async fn fetch_csv(client: &reqwest::Client, url: &str) -> Result<String> {
    log::debug!("Fetching CSV: {}", url);
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(TrainerError::HttpStatus(response.status()));
    }
    Ok(response.text().await?)
}

/// Loads and processes drill tables, tracking loading and error state
#[derive(Default)]
pub struct TrainingData {
    client: reqwest::Client,
    loading: AtomicBool,
    error: Mutex<Option<String>>,
}

impl TrainingData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Message of the last failed load, cleared when a new load starts
    pub fn error(&self) -> Option<String> {
        self.error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_error(&self, message: Option<String>) {
        *self.error.lock().unwrap_or_else(PoisonError::into_inner) = message;
    }

    /// Load the table for a mode. On failure nothing is returned but the error.
    pub async fn load(&self, mode: Mode, source: &DataSource) -> Result<Vec<DrillRow>> {
        self.loading.store(true, Ordering::SeqCst);
        self.set_error(None);

        let result = self.load_rows(source).await;
        self.loading.store(false, Ordering::SeqCst);

        match result {
            Ok(raw) => {
                let rows = process(&raw, mode);
                log::info!("Loaded {} {} rows from {}", rows.len(), mode, source);
                Ok(rows)
            }
            Err(e) => {
                log::error!("Error loading {} data: {}", mode, e);
                self.set_error(Some(e.to_string()));
                Err(e)
            }
        }
    }

    async fn load_rows(&self, source: &DataSource) -> Result<Vec<RawRow>> {
        match source {
            DataSource::Url(url) => {
                let text = fetch_csv(&self.client, url).await?;
                parse_csv(&text)
            }
            DataSource::Path(path) => read_csv(path),
        }
    }
}
