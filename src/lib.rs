//! Siteglean: a polite single-site page scraper
//!
//! This crate fetches a fixed sequence of pages from one origin while
//! respecting robots.txt, extracts structured fields from each page,
//! persists the records to SQLite keyed by URL, and exports them to CSV
//! and JSON.

pub mod config;
pub mod output;
pub mod robots;
pub mod scrape;
pub mod storage;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for siteglean operations
#[derive(Debug, Error)]
pub enum GleanError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("robots.txt unavailable for {origin}: {reason}")]
    PolicyUnavailable { origin: String, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for siteglean operations
pub type Result<T> = std::result::Result<T, GleanError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// A single extracted record, keyed by its source URL.
///
/// `title` and `description` may be empty when the page lacks the
/// corresponding markup; `url` is unique in the store (a later scrape of
/// the same URL replaces the earlier record).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedItem {
    pub title: String,
    pub description: String,
    pub url: String,
}

// Re-export commonly used types
pub use config::Config;
pub use robots::RobotsPolicy;
pub use scrape::{harvest, FetchFailure, FetchResult, Harvester};
pub use storage::SqliteStore;
