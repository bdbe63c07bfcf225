//! Prototype-inheritance record store
//!
//! Records form a forest of parent pointers and carry explicit field values
//! only where they differ from what they inherit — the store resolves
//! effective values by walking the ancestor chain, nearest ancestor first.
//!
//! # Architecture
//!
//! - **Borrowed data**: the store does not own its record sets. It holds a
//!   live mutable reference handed in at construction; the hosting session
//!   owns the collection and must keep exactly one store active per
//!   collection. Everything is single-threaded and synchronous.
//! - **Delta storage**: writing a value equal to the inherited one deletes
//!   the explicit entry instead of storing it, so `field_values` always
//!   holds the minimal set of overrides.
//! - **Reference integrity**: renaming or deleting a record rewrites every
//!   reference-typed field value and parent pointer that targets it.

pub mod error;
pub mod store;
pub mod types;

pub use error::{RecordsError, Result};
pub use store::RecordStore;
pub use types::{Record, RecordFieldValueMap, RecordSet, RecordSetList};
