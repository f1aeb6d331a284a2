//! Error types shared by every camharvest crate.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for harvester operations.
pub type HarvestResult<T> = Result<T, HarvestError>;

/// Errors that can occur while harvesting.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Missing credentials or an unreadable config file. Raised before any work starts.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The response body did not have the expected JSON shape.
    #[error("malformed response from {url}: {reason}")]
    Parse { url: String, reason: String },

    #[error("table error at {}: {reason}", path.display())]
    Table { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl HarvestError {
    pub fn table(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        HarvestError::Table {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
