//! Error types for the record store

use quill_fields::FieldsError;
use thiserror::Error;

/// Result type for record store operations
pub type Result<T> = std::result::Result<T, RecordsError>;

/// Errors that can occur in record store operations
#[derive(Debug, Error)]
pub enum RecordsError {
    /// Record not found by id. Also raised when an ancestor walk hits a
    /// dangling parent reference — a broken chain is a hard failure, never
    /// a silent truncation.
    #[error("record not found: {id}")]
    RecordNotFound { id: String },

    /// Field registry error
    #[error("field error: {0}")]
    Fields(#[from] FieldsError),
}

impl RecordsError {
    /// Create a record-not-found error
    pub fn record_not_found(id: impl Into<String>) -> Self {
        Self::RecordNotFound { id: id.into() }
    }
}
