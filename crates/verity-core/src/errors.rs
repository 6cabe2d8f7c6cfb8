//! Cross-cutting error types for Verity.
//!
//! Storage-level errors (`DatabaseError`) live in `verity-db` and workflow
//! errors in `verity-workflow`. Everything here can originate from plain data
//! handling without touching the database or filesystem.

use thiserror::Error;

/// Errors that can be raised by any Verity crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// User input failed validation (blank title, blank comments, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A stored or submitted value does not map to any known variant.
    #[error("Unrecognized {field} value: '{value}'")]
    UnknownValue { field: &'static str, value: String },
}

impl CoreError {
    /// Shorthand for a validation failure with a user-facing message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error should be shown inline next to the form.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
