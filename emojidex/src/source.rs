//! Dataset sources
//!
//! Where the dataset comes from is a collaborator's concern: a source either
//! yields the nested dataset or a `LoadError`. The catalog never propagates
//! that error; it substitutes the fallback set instead.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::models::RawDataset;

/// Error type for dataset loading
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unexpected dataset shape: {0}")]
    Shape(String),
    #[error("Dataset contains no entries")]
    Empty,
    #[error("Load task failed: {0}")]
    Task(String),
}

/// One-shot provider of the raw dataset.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<RawDataset, LoadError>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// Dataset held in memory as a JSON document.
#[derive(Debug, Clone)]
pub struct JsonSource {
    json: String,
}

impl JsonSource {
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

#[async_trait]
impl CatalogSource for JsonSource {
    async fn fetch(&self) -> Result<RawDataset, LoadError> {
        RawDataset::from_json_str(&self.json)
    }

    fn describe(&self) -> String {
        format!("inline JSON ({} bytes)", self.json.len())
    }
}

/// Dataset read from a JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    async fn fetch(&self) -> Result<RawDataset, LoadError> {
        let json = tokio::fs::read_to_string(&self.path).await?;
        RawDataset::from_json_str(&json)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Dataset fetched over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: Url,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: &str) -> Result<Self, LoadError> {
        Ok(Self {
            url: Url::parse(url)?,
            client: reqwest::Client::new(),
        })
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    async fn fetch(&self) -> Result<RawDataset, LoadError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?;
        let json = response.text().await?;
        RawDataset::from_json_str(&json)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

/// Pick a source for a location string: `http(s)://` URLs are fetched,
/// anything else is read as a file path.
pub fn source_for_location(location: &str) -> Result<Box<dyn CatalogSource>, LoadError> {
    let lower = location.trim().to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location.trim())?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}
