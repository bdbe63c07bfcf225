//! Type system and dynamic field values
//!
//! `quill-types` is the lowest crate of the Quill workspace. It knows nothing
//! about records or export templates — it owns the vocabulary the rest of the
//! core speaks:
//!
//! - **`Value`**: the dynamic union a record field can hold (scalar text,
//!   list, fixed-size numeric vector, or map)
//! - **`builtin`**: the canonical built-in type names and their
//!   classification helpers
//! - **`CustomType`**: user-defined types — derived types with constraining
//!   facets, enumerations, lists, and maps
//! - **`TypeSystem`**: the registry that resolves type names and answers
//!   "is this a list / a map / derived from X" queries

pub mod builtin;
pub mod custom;
pub mod error;
pub mod system;
pub mod value;

pub use custom::{CustomType, CustomTypeKind};
pub use error::{Result, TypesError};
pub use system::TypeSystem;
pub use value::Value;
