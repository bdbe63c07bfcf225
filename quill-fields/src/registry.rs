//! FieldRegistry — ordered collection of field definitions.

use tracing::debug;

use crate::error::{FieldsError, Result};
use crate::types::FieldDefinition;

/// Registry of field definitions, kept in registration order.
///
/// The registry is pure schema. Removing or renaming a definition does not
/// touch stored record values; the record store exposes the matching
/// propagation operations and callers are expected to invoke both.
#[derive(Debug, Default)]
pub struct FieldRegistry {
    fields: Vec<FieldDefinition>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field definition. Ids must be unique.
    pub fn add_field_definition(&mut self, field: FieldDefinition) -> Result<()> {
        if self.has_field_definition(&field.id) {
            return Err(FieldsError::DuplicateFieldId { id: field.id });
        }
        debug!(id = %field.id, field_type = %field.field_type, "added field definition");
        self.fields.push(field);
        Ok(())
    }

    /// Look up a field definition by id.
    pub fn get_field_definition(&self, id: &str) -> Result<&FieldDefinition> {
        self.fields
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| FieldsError::FieldNotFound { id: id.into() })
    }

    /// All field definitions, in registration order.
    pub fn get_field_definitions(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Whether a definition exists for this id.
    pub fn has_field_definition(&self, id: &str) -> bool {
        self.fields.iter().any(|f| f.id == id)
    }

    /// Remove a field definition and return it.
    pub fn remove_field_definition(&mut self, id: &str) -> Result<FieldDefinition> {
        let index = self
            .fields
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| FieldsError::FieldNotFound { id: id.into() })?;
        debug!(id, "removed field definition");
        Ok(self.fields.remove(index))
    }

    /// Rewrite a definition's id. Stored record values keep their keys until
    /// the store's `rename_record_field` is called with the same pair.
    pub fn rename_field_definition(&mut self, old_id: &str, new_id: &str) -> Result<()> {
        if self.has_field_definition(new_id) {
            return Err(FieldsError::DuplicateFieldId { id: new_id.into() });
        }
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.id == old_id)
            .ok_or_else(|| FieldsError::FieldNotFound { id: old_id.into() })?;
        field.id = new_id.to_string();
        Ok(())
    }
}
