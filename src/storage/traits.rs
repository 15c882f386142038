//! Storage traits and error types
//!
//! This module defines the persistence contract the record store writes
//! through, and the errors it can surface.

use crate::storage::{BatchStatement, SqlDialect};
use thiserror::Error;

/// Errors that can occur during storage operations
///
/// Any of these ends the run: once a batch fails the persisted state is
/// unknown.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Unable to prepare statement: {source}")]
    Prepare { source: rusqlite::Error },

    #[error("Unable to insert data: {source}")]
    Execute { source: rusqlite::Error },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for backends that can run a parameterized batch insert
pub trait BatchSink {
    /// SQL flavour the statement must be rendered in
    fn dialect(&self) -> SqlDialect;

    /// Prepares and executes one statement
    ///
    /// # Returns
    ///
    /// The number of rows the backend reports as inserted
    fn execute_batch(&mut self, statement: &BatchStatement) -> StorageResult<usize>;

    /// Executes several statements as one unit
    ///
    /// Backends with transactions must leave no row of any statement behind
    /// when one of them fails. The default runs the statements in order.
    fn execute_all(&mut self, statements: &[BatchStatement]) -> StorageResult<usize> {
        let mut inserted = 0;
        for statement in statements {
            inserted += self.execute_batch(statement)?;
        }
        Ok(inserted)
    }
}
