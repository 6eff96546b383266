//! SQLite store implementation

use crate::storage::schema::initialize_schema;
use crate::storage::{StorageError, StorageResult};
use crate::ScrapedItem;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite-backed item store, keyed by URL
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (creating if absent) the database at the given path and
    /// ensures the schema exists
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        initialize_schema(&conn).map_err(StorageError::SchemaInit)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory store (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn).map_err(StorageError::SchemaInit)?;
        Ok(Self { conn })
    }

    /// Inserts the item, or overwrites the stored title/description when
    /// its URL already exists. Each call commits independently.
    pub fn upsert(&mut self, item: &ScrapedItem) -> StorageResult<()> {
        self.conn
            .execute(
                "INSERT INTO scraped_items (title, description, url) VALUES (?1, ?2, ?3)
                 ON CONFLICT(url) DO UPDATE SET
                     title = excluded.title,
                     description = excluded.description",
                params![item.title, item.description, item.url],
            )
            .map_err(|e| StorageError::Write {
                url: item.url.clone(),
                source: e,
            })?;
        Ok(())
    }

    /// Looks up the stored item for a URL
    pub fn get_by_url(&self, url: &str) -> StorageResult<Option<ScrapedItem>> {
        let item = self
            .conn
            .query_row(
                "SELECT title, description, url FROM scraped_items WHERE url = ?1",
                params![url],
                |row| {
                    Ok(ScrapedItem {
                        title: row.get(0)?,
                        description: row.get(1)?,
                        url: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(item)
    }

    /// Returns every stored item in insertion order
    pub fn all_items(&self) -> StorageResult<Vec<ScrapedItem>> {
        let mut stmt = self
            .conn
            .prepare("SELECT title, description, url FROM scraped_items ORDER BY id")?;

        let items = stmt
            .query_map([], |row| {
                Ok(ScrapedItem {
                    title: row.get(0)?,
                    description: row.get(1)?,
                    url: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Number of stored items
    pub fn count(&self) -> StorageResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM scraped_items", [], |row| row.get(0))?;
        Ok(count)
    }
}
