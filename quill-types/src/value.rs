//! The dynamic value a record field can hold.
//!
//! Field values are typed by their `FieldDefinition`, not by the value
//! itself — the variant here only carries the shape. Scalars store their
//! text form; vectors store 2 or 3 numeric components in order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single field value: scalar text, a list, a fixed-size numeric vector,
/// or a string-keyed map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum Value {
    Scalar(String),
    List(Vec<Value>),
    Vector(Vec<f64>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// The scalar text of this value. Aggregates render as empty text;
    /// list and vector formatting is the export engine's job.
    pub fn as_text(&self) -> &str {
        match self {
            Value::Scalar(text) => text,
            _ => "",
        }
    }

    /// A named vector component (0 = X, 1 = Y, 2 = Z) as text, empty when
    /// the component is absent or this is not a vector.
    pub fn component_text(&self, index: usize) -> String {
        match self {
            Value::Vector(components) => components
                .get(index)
                .map(|c| c.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        }
    }

    /// The list items of this value, empty for non-lists.
    pub fn items(&self) -> &[Value] {
        match self {
            Value::List(items) => items,
            _ => &[],
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Scalar(String::new())
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Scalar(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Scalar(text)
    }
}
