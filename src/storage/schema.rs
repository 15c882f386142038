//! Database schema definitions
//!
//! This module contains the SQL schema for the flats database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Extracted flat listings, one row per external id
CREATE TABLE IF NOT EXISTS flats (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    id_external INTEGER NOT NULL UNIQUE,
    text TEXT NOT NULL,
    district TEXT NOT NULL,
    street TEXT NOT NULL,
    rooms INTEGER NOT NULL,
    apartment_area INTEGER NOT NULL,
    floor TEXT NOT NULL,
    house_type TEXT NOT NULL,
    price INTEGER NOT NULL,
    type TEXT NOT NULL,
    url TEXT NOT NULL,
    added_dt TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_flats_type ON flats(type);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
