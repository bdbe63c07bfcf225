//! Error types for the export engine

use std::path::PathBuf;

use quill_fields::FieldsError;
use quill_records::RecordsError;
use quill_types::TypesError;
use thiserror::Error;

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that can occur during export
#[derive(Debug, Error)]
pub enum ExportError {
    /// No export template registered under the given name
    #[error("export template not found: {name}")]
    TemplateNotFound { name: String },

    /// Destination file could not be opened for writing
    #[error("destination file could not be written: {path}")]
    Destination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Record store error
    #[error("record error: {0}")]
    Records(#[from] RecordsError),

    /// Field registry error
    #[error("field error: {0}")]
    Fields(#[from] FieldsError),

    /// Type system error
    #[error("type error: {0}")]
    Types(#[from] TypesError),

    /// IO error while writing the artifact
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error while loading templates
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}
