//! User-defined custom types.
//!
//! All types serialize to/from YAML via serde. A custom type is a named
//! refinement over the built-ins: a derived type narrowing a base type with
//! facets, an enumeration of allowed members, a list of some item type, or a
//! map between two types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The kind of a custom type — determines what shape its values take.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CustomTypeKind {
    /// Narrows a base type with constraining facets (e.g. minimum/maximum).
    Derived {
        base_type: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        facets: BTreeMap<String, String>,
    },
    /// A closed set of allowed member values.
    Enumeration { members: Vec<String> },
    /// An ordered sequence of values of a single item type.
    List { item_type: String },
    /// A mapping between a key type and a value type.
    Map {
        key_type: String,
        value_type: String,
    },
}

/// A user-defined type, registered with the `TypeSystem` under its name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomType {
    pub name: String,
    /// Grouping label for the editor UI; opaque to the core.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub type_set: String,
    #[serde(flatten)]
    pub kind: CustomTypeKind,
}

impl CustomType {
    /// Whether this is a list type.
    pub fn is_list(&self) -> bool {
        matches!(self.kind, CustomTypeKind::List { .. })
    }

    /// Whether this is a map type.
    pub fn is_map(&self) -> bool {
        matches!(self.kind, CustomTypeKind::Map { .. })
    }

    /// The item type of a list type.
    pub fn item_type(&self) -> Option<&str> {
        match &self.kind {
            CustomTypeKind::List { item_type } => Some(item_type),
            _ => None,
        }
    }

    /// The base type of a derived type.
    pub fn base_type(&self) -> Option<&str> {
        match &self.kind {
            CustomTypeKind::Derived { base_type, .. } => Some(base_type),
            _ => None,
        }
    }

    /// The members of an enumeration type.
    pub fn members(&self) -> &[String] {
        match &self.kind {
            CustomTypeKind::Enumeration { members } => members,
            _ => &[],
        }
    }
}
