//! Field definition registry
//!
//! `quill-fields` owns the schema side of record data: which fields exist,
//! what type each one has, its default value, and the component it belongs
//! to. It never stores field *values* — those live on records.

pub mod error;
pub mod registry;
pub mod types;

pub use error::{FieldsError, Result};
pub use registry::FieldRegistry;
pub use types::FieldDefinition;
