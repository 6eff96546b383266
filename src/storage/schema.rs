//! Database schema definition

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS scraped_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT,
    description TEXT,
    url TEXT UNIQUE
);

CREATE INDEX IF NOT EXISTS idx_scraped_items_url ON scraped_items(url);
"#;

/// Initializes the database schema. Idempotent; safe to run on every
/// startup.
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)
}
