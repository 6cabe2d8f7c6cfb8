//! Workflow error types.

use thiserror::Error;
use verity_core::errors::CoreError;
use verity_db::error::DatabaseError;

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Input rejected before anything was stored. Shown next to the form.
    #[error("{0}")]
    Validation(String),

    /// The database or upload directory failed. Nothing is retried.
    #[error(transparent)]
    Storage(DatabaseError),
}

impl WorkflowError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<DatabaseError> for WorkflowError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::Validation(message) => Self::Validation(message),
            other => Self::Storage(other),
        }
    }
}

impl From<CoreError> for WorkflowError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(message) => Self::Validation(message),
            other => Self::Storage(other.into()),
        }
    }
}
