//! Database error types for verity-db.

use thiserror::Error;
use verity_core::errors::CoreError;

/// Errors from storage operations (database and upload files).
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned data that could not be decoded.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// The addressed task does not exist.
    #[error("Task {id} not found")]
    NotFound { id: i64 },

    /// Input rejected before anything was written.
    #[error("{0}")]
    Validation(String),

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Reading or writing an upload file failed.
    #[error("File operation failed for '{path}': {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

impl DatabaseError {
    /// Whether this is a user-input problem rather than a storage failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<CoreError> for DatabaseError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(message) => Self::Validation(message),
            CoreError::NotFound { entity_type, id } => {
                Self::InvalidState(format!("{entity_type} {id} not found"))
            }
            unknown @ CoreError::UnknownValue { .. } => Self::InvalidState(unknown.to_string()),
        }
    }
}
