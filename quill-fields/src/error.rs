//! Error types for the field registry

use thiserror::Error;

/// Result type for field registry operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur in field registry operations
#[derive(Debug, Error)]
pub enum FieldsError {
    /// Field definition not found by id
    #[error("field not found: {id}")]
    FieldNotFound { id: String },

    /// A field definition with this id already exists
    #[error("duplicate field id: {id}")]
    DuplicateFieldId { id: String },
}
