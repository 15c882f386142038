//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the BatchSink trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{BatchSink, StorageError, StorageResult};
use crate::storage::{BatchStatement, SqlDialect};
use rusqlite::{params, params_from_iter, Connection};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens or creates the flats database
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database or apply the schema
    pub fn open(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Counts stored flats
    pub fn count_flats(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM flats", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Counts stored flats per listing label, ordered by label
    pub fn count_flats_by_type(&self) -> StorageResult<Vec<(String, u64)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT type, COUNT(*) FROM flats GROUP BY type ORDER BY type")?;

        let counts = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get::<_, i64>(1)? as u64)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(counts)
    }

    /// Looks up the stored price of a flat by its external id
    pub fn price_of(&self, id_external: i64) -> StorageResult<Option<i64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT price FROM flats WHERE id_external = ?1")?;
        let mut rows = stmt.query_map(params![id_external], |row| row.get(0))?;

        Ok(rows.next().transpose()?)
    }
}

impl BatchSink for SqliteStorage {
    fn dialect(&self) -> SqlDialect {
        SqlDialect::Sqlite
    }

    fn execute_batch(&mut self, statement: &BatchStatement) -> StorageResult<usize> {
        run_statement(&self.conn, statement)
    }

    /// Runs every statement in one transaction; any failure rolls all back
    fn execute_all(&mut self, statements: &[BatchStatement]) -> StorageResult<usize> {
        let tx = self.conn.transaction()?;

        let mut inserted = 0;
        for statement in statements {
            inserted += run_statement(&tx, statement)?;
        }

        tx.commit()?;
        Ok(inserted)
    }
}

fn run_statement(conn: &Connection, statement: &BatchStatement) -> StorageResult<usize> {
    let mut prepared = conn
        .prepare(&statement.sql)
        .map_err(|source| StorageError::Prepare { source })?;

    prepared
        .execute(params_from_iter(statement.params.iter()))
        .map_err(|source| StorageError::Execute { source })
}
