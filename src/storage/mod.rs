//! Storage module for staging and persisting listings
//!
//! This module handles:
//! - The in-memory record store filled during a crawl
//! - Rendering stored records into a parameterized batch insert
//! - SQLite database initialization and schema management
//! - The time source stamped on persisted rows

mod clock;
mod record_store;
mod schema;
mod sqlite;
mod traits;

pub use clock::{Clock, FixedClock, SystemClock, DATE_TIME_FORMAT};
pub use record_store::{RecordStore, MAX_RECORDS_PER_STATEMENT};
pub use sqlite::SqliteStorage;
pub use traits::{BatchSink, StorageError, StorageResult};

use rusqlite::types::ToSqlOutput;
use rusqlite::ToSql;

/// Columns of the `flats` table written by a batch insert, in parameter order
pub const FLAT_COLUMNS: [&str; 12] = [
    "id_external",
    "text",
    "district",
    "street",
    "rooms",
    "apartment_area",
    "floor",
    "house_type",
    "price",
    "type",
    "url",
    "added_dt",
];

/// Parameters bound per record
pub const COLUMN_COUNT: usize = FLAT_COLUMNS.len();

/// SQL flavour of the ignore-on-conflict insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDialect {
    MySql,
    Sqlite,
}

impl SqlDialect {
    /// Insert verb that silently skips rows violating a unique key
    pub fn insert_ignore(&self) -> &'static str {
        match self {
            Self::MySql => "INSERT IGNORE",
            Self::Sqlite => "INSERT OR IGNORE",
        }
    }
}

/// A single bound parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Int(i64),
    Text(String),
}

impl ToSql for SqlParam {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Self::Int(value) => value.to_sql(),
            Self::Text(value) => value.to_sql(),
        }
    }
}

/// A multi-row insert with its flattened parameter list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchStatement {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl BatchStatement {
    /// Number of records the statement inserts
    pub fn row_count(&self) -> usize {
        self.params.len() / COLUMN_COUNT
    }
}
