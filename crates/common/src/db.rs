//! Shared store types for Cinedex
//!
//! Store implementations (Postgres and in-memory) report failures through
//! [`RepositoryError`]; handlers convert them into the HTTP taxonomy.

use crate::error::Error;
use thiserror::Error;

/// Store-level error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Record already exists")]
    AlreadyExists,

    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Map a sqlx error, recognising unique-constraint violations.
    pub fn from_insert(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => RepositoryError::AlreadyExists,
            _ => RepositoryError::Connection(err),
        }
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::AlreadyExists => Error::Conflict("Record already exists".to_string()),
            RepositoryError::Connection(e) => Error::Database(e),
            // Stored data that fails to decode is a server-side fault
            RepositoryError::InvalidData(msg) => Error::Internal(msg),
        }
    }
}
