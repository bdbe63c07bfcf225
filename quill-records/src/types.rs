//! Record and record set types.
//!
//! All types serialize to/from YAML via serde; project file persistence is
//! a consumer concern.

use std::collections::BTreeMap;

use quill_types::Value;
use serde::{Deserialize, Serialize};

/// Mapping from field id to value, ordered by field id.
pub type RecordFieldValueMap = BTreeMap<String, Value>;

/// A node in the prototype hierarchy.
///
/// `field_values` holds only the explicit overrides of this record; unset
/// fields resolve through the ancestor chain. An empty `parent_id` marks a
/// root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parent_id: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub field_values: RecordFieldValueMap,
}

impl Record {
    /// A root record with no fields.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            parent_id: String::new(),
            field_values: RecordFieldValueMap::new(),
        }
    }

    /// Whether this record has a parent.
    pub fn has_parent(&self) -> bool {
        !self.parent_id.is_empty()
    }
}

/// An ordered sequence of records, sorted by display name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecordSet {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub records: Vec<Record>,
}

impl RecordSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
        }
    }
}

/// The collection a `RecordStore` operates on. Mutation targets the first
/// set; additional sets only widen the read scope of aggregate queries.
pub type RecordSetList = Vec<RecordSet>;
