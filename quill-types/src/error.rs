//! Error types for the type system

use thiserror::Error;

/// Result type for type system operations
pub type Result<T> = std::result::Result<T, TypesError>;

/// Errors that can occur in type system operations
#[derive(Debug, Error)]
pub enum TypesError {
    /// No custom type registered under the given name
    #[error("custom type not found: {name}")]
    TypeNotFound { name: String },

    /// A custom type with this name is already registered
    #[error("duplicate custom type: {name}")]
    DuplicateType { name: String },
}
