//! Export module
//!
//! Writes the run's accumulated items to flat files: CSV with a
//! `title,description,url` header row and a pretty-printed JSON array.
//! Both are UTF-8.

mod csv;
mod json;

pub use self::csv::write_csv;
pub use self::json::write_json;

use thiserror::Error;

/// Errors that can occur while writing export files
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
