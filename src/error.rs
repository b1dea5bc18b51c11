use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while scraping or exporting.
///
/// Only dimension lookups are recovered in place (they substitute a
/// sentinel and log); every variant here aborts the run.
#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("element not found: {field} on {url}")]
    ElementNotFound { field: &'static str, url: String },

    #[error("invalid {field} selector {pattern:?}: {message}")]
    Selector {
        field: &'static str,
        pattern: String,
        message: String,
    },

    #[error("failed to reach a WebDriver server: {0}")]
    Connect(#[from] fantoccini::error::NewSessionError),

    #[error("failed to load {url}: {source}")]
    Navigation {
        url: String,
        #[source]
        source: fantoccini::error::CmdError,
    },

    #[error("timed out loading {url}")]
    PageTimeout { url: String },

    #[error("WebDriver command failed: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),

    #[error("category worker failed: {0}")]
    Worker(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias for scraper operations.
pub type Result<T> = std::result::Result<T, HarvestError>;
