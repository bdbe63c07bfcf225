//! Export template configuration.
//!
//! A template is plain data: literal text fragments carrying placeholder
//! tokens, plus a type-name mapping and the table-mode switch. Templates
//! load from YAML and are grouped in a named map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};

/// Placeholder tokens recognized by the export engine.
///
/// Each token is only substituted in the template fragments that define it;
/// anywhere else it stays literal text.
pub mod placeholder {
    /// All rendered records, in `record_file_template`.
    pub const RECORDS: &str = "$RECORDS$";
    /// Record id, in `record_template`.
    pub const RECORD_ID: &str = "$RECORD_ID$";
    /// Parent record id (empty for roots), in `record_template`.
    pub const RECORD_PARENT: &str = "$RECORD_PARENT$";
    /// Joined rendered fields, in `record_template`.
    pub const RECORD_FIELDS: &str = "$RECORD_FIELDS$";
    /// Joined rendered component names, in `record_template`.
    pub const COMPONENTS: &str = "$COMPONENTS$";
    /// One component name, in `component_template`.
    pub const COMPONENT_NAME: &str = "$COMPONENT_NAME$";
    /// Field id, in the field/list/map templates.
    pub const FIELD_ID: &str = "$FIELD_ID$";
    /// Vector component key (X, Y, Z), in `map_item_template`.
    pub const FIELD_KEY: &str = "$FIELD_KEY$";
    /// Exported field type name, in the field/list templates.
    pub const FIELD_TYPE: &str = "$FIELD_TYPE$";
    /// Rendered field value, in the field/list/map templates.
    pub const FIELD_VALUE: &str = "$FIELD_VALUE$";
    /// One raw list item, in `list_item_template`.
    pub const LIST_ITEM: &str = "$LIST_ITEM$";
}

/// A record export template: the full configuration of one output format.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecordExportTemplate {
    /// Template name, the key it is registered under.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// File extension the editor suggests for the artifact.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub file_extension: String,
    pub record_file_template: String,
    pub record_template: String,
    pub record_delimiter: String,
    pub field_value_template: String,
    pub field_value_delimiter: String,
    pub list_template: String,
    pub list_item_template: String,
    pub list_item_delimiter: String,
    pub map_template: String,
    pub map_item_template: String,
    pub map_item_delimiter: String,
    pub component_template: String,
    pub component_delimiter: String,
    /// Mapping from internal type name to exported type name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub type_map: BTreeMap<String, String>,
    /// Render every registry field per record, padding unset ones with
    /// empty text.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub export_as_table: bool,
}

impl RecordExportTemplate {
    /// The exported name for a type: mapped through `type_map` when present,
    /// passed through unchanged otherwise.
    pub fn mapped_type(&self, type_name: &str) -> String {
        self.type_map
            .get(type_name)
            .cloned()
            .unwrap_or_else(|| type_name.to_string())
    }

    /// Parse a single template from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }
}

/// Named map of export templates.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ExportTemplates {
    templates: BTreeMap<String, RecordExportTemplate>,
}

impl ExportTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template under its own name.
    pub fn insert(&mut self, template: RecordExportTemplate) {
        self.templates.insert(template.name.clone(), template);
    }

    /// Look up a template by name.
    pub fn get(&self, name: &str) -> Result<&RecordExportTemplate> {
        self.templates
            .get(name)
            .ok_or_else(|| ExportError::TemplateNotFound { name: name.into() })
    }

    /// All templates, keyed by name.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &RecordExportTemplate)> {
        self.templates.iter()
    }

    /// Parse a name-to-template map from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }
}
