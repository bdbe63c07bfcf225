//! The field definition type.

use quill_types::Value;
use serde::{Deserialize, Serialize};

/// A field definition — the complete schema for a single named attribute.
///
/// `field_type` is a type name resolved by the type system: either a
/// built-in or a registered custom type. `component` is a free-form grouping
/// label consumed by the export engine and the editor UI; empty means
/// ungrouped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDefinition {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub field_type: String,
    #[serde(default)]
    pub default_value: Value,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub component: String,
}

impl FieldDefinition {
    /// A definition with just id and type; the default value is an empty
    /// scalar and no component is assigned.
    pub fn new(id: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: String::new(),
            description: None,
            field_type: field_type.into(),
            default_value: Value::default(),
            component: String::new(),
        }
    }

    /// Set the default value.
    pub fn with_default(mut self, default_value: impl Into<Value>) -> Self {
        self.default_value = default_value.into();
        self
    }

    /// Set the component grouping label.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }
}
