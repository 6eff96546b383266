//! Storage module for persisting scraped items
//!
//! A single SQLite table maps each URL to its latest extracted record.
//! Every upsert commits on its own, so a crash mid-run leaves the store
//! consistent with all items processed so far.

mod schema;
mod sqlite;

pub use schema::{initialize_schema, SCHEMA_SQL};
pub use sqlite::SqliteStore;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to initialize schema: {0}")]
    SchemaInit(#[source] rusqlite::Error),

    #[error("failed to write item for {url}: {source}")]
    Write {
        url: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
