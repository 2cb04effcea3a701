//! Fetching a snapshot document from a file or URL.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur while fetching a snapshot.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Local file could not be read.
    #[error("Read error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Server answered with a non-success status.
    #[error("Server returned status {0}")]
    Status(u16),

    /// Body was not a valid snapshot.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Location string could not be understood.
    #[error("Invalid location: {0}")]
    InvalidLocation(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Http(err.to_string())
        }
    }
}

/// Where a snapshot document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotLocation {
    File(PathBuf),
    Url(Url),
}

impl SnapshotLocation {
    /// `http://` and `https://` locations are URLs; anything else is a path.
    pub fn parse(s: &str) -> Result<Self, FetchError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(FetchError::InvalidLocation("empty location".to_string()));
        }

        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Url::parse(s)
                .map(SnapshotLocation::Url)
                .map_err(|e| FetchError::InvalidLocation(format!("{}: {}", s, e)))
        } else {
            Ok(SnapshotLocation::File(PathBuf::from(s)))
        }
    }

    pub fn file<P: AsRef<Path>>(path: P) -> Self {
        SnapshotLocation::File(path.as_ref().to_path_buf())
    }

    /// Fetch and parse the snapshot.
    pub async fn fetch<S: DeserializeOwned>(&self, client: &Client) -> Result<S, FetchError> {
        let bytes = match self {
            SnapshotLocation::File(path) => tokio::fs::read(path).await?,
            SnapshotLocation::Url(url) => {
                let response = client.get(url.clone()).send().await?;
                if !response.status().is_success() {
                    return Err(FetchError::Status(response.status().as_u16()));
                }
                response.bytes().await?.to_vec()
            }
        };

        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl FromStr for SnapshotLocation {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SnapshotLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotLocation::File(path) => write!(f, "file: {}", path.display()),
            SnapshotLocation::Url(url) => write!(f, "url: {}", url),
        }
    }
}
