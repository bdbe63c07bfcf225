//! RecordStore — inheritance resolution, mutation, and reference integrity.

use quill_fields::FieldRegistry;
use quill_types::{builtin, Value};
use tracing::debug;

use crate::error::{RecordsError, Result};
use crate::types::{Record, RecordFieldValueMap, RecordSet, RecordSetList};

/// The record store. Borrows a live record-set collection and the field
/// registry for the duration of an editing session.
///
/// Lookups by unknown record id fail with [`RecordsError::RecordNotFound`];
/// callers validate ids obtained from user input before invoking mutators
/// that assume existence. The store performs no cycle checks on parentage —
/// preventing cycles is an upstream concern.
pub struct RecordStore<'a> {
    sets: &'a mut RecordSetList,
    fields: &'a FieldRegistry,
}

impl<'a> RecordStore<'a> {
    /// Attach a store to an externally-owned collection. The caller must
    /// keep this the only active mutator of `sets` while the store lives.
    pub fn new(sets: &'a mut RecordSetList, fields: &'a FieldRegistry) -> Self {
        Self { sets, fields }
    }

    /// Insert a new record with no parent and no fields, at its sorted
    /// position by display name in the first set. A default first set is
    /// created if the collection is empty. Returns a copy of the new record.
    pub fn add_record(&mut self, id: impl Into<String>, display_name: impl Into<String>) -> Record {
        let record = Record::new(id, display_name);

        if self.sets.is_empty() {
            self.sets.push(RecordSet::default());
        }
        let records = &mut self.sets[0].records;
        // First position whose display name sorts after the new one; ties
        // keep insertion order.
        let index = records
            .iter()
            .position(|r| r.display_name > record.display_name)
            .unwrap_or(records.len());
        records.insert(index, record.clone());

        debug!(id = %record.id, "added record");
        record
    }

    /// Attach a field to a record by storing the registry default verbatim
    /// as an explicit value.
    pub fn add_record_field(&mut self, record_id: &str, field_id: &str) -> Result<()> {
        let default_value = self
            .fields
            .get_field_definition(field_id)
            .map_err(RecordsError::from)?
            .default_value
            .clone();
        let record = self.record_mut(record_id)?;
        record
            .field_values
            .insert(field_id.to_string(), default_value);
        Ok(())
    }

    /// The ancestor chain of a record, nearest first. A dangling parent
    /// reference anywhere in the chain is a hard failure.
    pub fn get_ancestors(&self, id: &str) -> Result<Vec<Record>> {
        let mut ancestors = Vec::new();
        let mut parent_id = self.record(id)?.parent_id.clone();

        while !parent_id.is_empty() {
            let ancestor = self.record(&parent_id)?.clone();
            parent_id = ancestor.parent_id.clone();
            ancestors.push(ancestor);
        }

        Ok(ancestors)
    }

    /// Direct children of a record, in store order, across all sets.
    pub fn get_children(&self, id: &str) -> Vec<Record> {
        self.records()
            .filter(|r| r.parent_id == id)
            .cloned()
            .collect()
    }

    /// All transitive children of a record: each child followed by its own
    /// descendants.
    pub fn get_descendants(&self, id: &str) -> Vec<Record> {
        let mut descendants = Vec::new();
        for child in self.get_children(id) {
            let grandchildren = self.get_descendants(&child.id);
            descendants.push(child);
            descendants.extend(grandchildren);
        }
        descendants
    }

    /// The first value for `field_id` found walking the ancestor chain
    /// nearest-first, or `None` if no ancestor defines it.
    pub fn get_inherited_field_value(&self, id: &str, field_id: &str) -> Result<Option<Value>> {
        for ancestor in self.get_ancestors(id)? {
            if let Some(value) = ancestor.field_values.get(field_id) {
                return Ok(Some(value.clone()));
            }
        }
        Ok(None)
    }

    /// All values a record inherits, merged furthest ancestor first so the
    /// nearest ancestor wins — consistent with `get_inherited_field_value`.
    pub fn get_inherited_field_values(&self, id: &str) -> Result<RecordFieldValueMap> {
        let ancestors = self.get_ancestors(id)?;

        let mut field_values = RecordFieldValueMap::new();
        for ancestor in ancestors.iter().rev() {
            for (field_id, value) in &ancestor.field_values {
                field_values.insert(field_id.clone(), value.clone());
            }
        }

        Ok(field_values)
    }

    /// The effective values of a record: inherited values overridden by its
    /// own explicit entries. This is the canonical query used by export and
    /// the editor.
    pub fn get_record_field_values(&self, id: &str) -> Result<RecordFieldValueMap> {
        let mut field_values = self.get_inherited_field_values(id)?;
        let record = self.record(id)?;

        for (field_id, value) in &record.field_values {
            field_values.insert(field_id.clone(), value.clone());
        }

        Ok(field_values)
    }

    /// Look up a record by id.
    pub fn get_record(&self, id: &str) -> Result<&Record> {
        self.record(id)
    }

    /// Whether a record with this id exists in any set.
    pub fn has_record(&self, id: &str) -> bool {
        self.records().any(|r| r.id == id)
    }

    /// All records across all sets, in store order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.sets.iter().flat_map(|set| set.records.iter())
    }

    /// Ids of all records across all sets.
    pub fn record_ids(&self) -> Vec<String> {
        self.records().map(|r| r.id.clone()).collect()
    }

    /// Display names of all records across all sets.
    pub fn record_display_names(&self) -> Vec<String> {
        self.records().map(|r| r.display_name.clone()).collect()
    }

    /// The backing record sets, for read passes such as export.
    pub fn record_sets(&self) -> &[RecordSet] {
        self.sets
    }

    /// Whether `candidate` appears in `record_id`'s ancestor chain. Empty
    /// ids are never ancestors.
    pub fn is_ancestor_of(&self, candidate: &str, record_id: &str) -> Result<bool> {
        if candidate.is_empty() || record_id.is_empty() {
            return Ok(false);
        }
        let ancestors = self.get_ancestors(record_id)?;
        Ok(ancestors.iter().any(|a| a.id == candidate))
    }

    /// Remove a record: sever every reference and parent pointer targeting
    /// it, remove its children recursively, then erase the record itself.
    pub fn remove_record(&mut self, record_id: &str) -> Result<()> {
        // Collect children before severing references; severing reparents
        // them to the empty id.
        let children = self.get_children(record_id);

        self.update_record_references(record_id, "")?;

        for child in children {
            self.remove_record(&child.id)?;
        }

        if let Some(set) = self.sets.first_mut() {
            set.records.retain(|r| r.id != record_id);
        }

        debug!(id = record_id, "removed record");
        Ok(())
    }

    /// Remove a field value from one record and, cascading, from all of its
    /// descendants — a descendant override without the inherited entry would
    /// otherwise dangle.
    pub fn remove_record_field(&mut self, record_id: &str, field_id: &str) -> Result<()> {
        let record = self.record_mut(record_id)?;
        record.field_values.remove(field_id);

        for descendant in self.get_descendants(record_id) {
            self.remove_record_field(&descendant.id, field_id)?;
        }

        Ok(())
    }

    /// Remove a field value from every record in every set.
    pub fn remove_field_from_all_records(&mut self, field_id: &str) {
        for set in self.sets.iter_mut() {
            for record in &mut set.records {
                record.field_values.remove(field_id);
            }
        }
    }

    /// Rewrite a field key in every record that stores it, across all sets.
    pub fn rename_record_field(&mut self, old_field_id: &str, new_field_id: &str) {
        for set in self.sets.iter_mut() {
            for record in &mut set.records {
                if let Some(value) = record.field_values.remove(old_field_id) {
                    record.field_values.insert(new_field_id.to_string(), value);
                }
            }
        }
    }

    /// Restore a field to its inherited value. When an ancestor defines the
    /// field, its value becomes the new effective value (which deletes the
    /// explicit entry) and is returned; otherwise the current effective
    /// value is returned unchanged.
    pub fn revert_field_value(&mut self, record_id: &str, field_id: &str) -> Result<Value> {
        if let Some(inherited) = self.get_inherited_field_value(record_id, field_id)? {
            self.update_record_field_value(record_id, field_id, inherited.clone())?;
            return Ok(inherited);
        }

        let field_values = self.get_record_field_values(record_id)?;
        Ok(field_values.get(field_id).cloned().unwrap_or_default())
    }

    /// Reassign a record's parent. No cycle check.
    pub fn reparent_record(&mut self, record_id: &str, new_parent_id: &str) -> Result<()> {
        let record = self.record_mut(record_id)?;
        record.parent_id = new_parent_id.to_string();
        Ok(())
    }

    /// Rename a record and update its display name. References and parent
    /// pointers are rewritten first; the first set is re-sorted when the
    /// display name changed.
    pub fn update_record(&mut self, old_id: &str, new_id: &str, display_name: &str) -> Result<()> {
        self.update_record_references(old_id, new_id)?;

        let record = self.record_mut(old_id)?;
        let needs_sorting = record.display_name != display_name;
        record.id = new_id.to_string();
        record.display_name = display_name.to_string();

        if needs_sorting {
            if let Some(set) = self.sets.first_mut() {
                set.records
                    .sort_by(|a, b| a.display_name.cmp(&b.display_name));
            }
        }

        debug!(old_id, new_id, "updated record");
        Ok(())
    }

    /// Store a field value on a record. Writing the inherited value deletes
    /// the explicit entry instead — storage holds only deltas.
    pub fn update_record_field_value(
        &mut self,
        record_id: &str,
        field_id: &str,
        value: Value,
    ) -> Result<()> {
        let inherited = self.get_inherited_field_value(record_id, field_id)?;
        let record = self.record_mut(record_id)?;

        if inherited.as_ref() == Some(&value) {
            record.field_values.remove(field_id);
        } else {
            record.field_values.insert(field_id.to_string(), value);
        }

        Ok(())
    }

    /// Rewrite every effective reference-typed field value equal to
    /// `old_reference` to `new_reference`, and reparent every record whose
    /// parent was `old_reference`.
    pub fn update_record_references(
        &mut self,
        old_reference: &str,
        new_reference: &str,
    ) -> Result<()> {
        let fields = self.fields;
        let record_ids = self.record_ids();

        for record_id in record_ids {
            let field_values = self.get_record_field_values(&record_id)?;

            for (field_id, value) in &field_values {
                let field = fields
                    .get_field_definition(field_id)
                    .map_err(RecordsError::from)?;

                if field.field_type == builtin::REFERENCE && value.as_text() == old_reference {
                    self.update_record_field_value(
                        &record_id,
                        field_id,
                        Value::from(new_reference),
                    )?;
                }
            }

            if self.record(&record_id)?.parent_id == old_reference {
                self.reparent_record(&record_id, new_reference)?;
            }
        }

        Ok(())
    }

    fn record(&self, id: &str) -> Result<&Record> {
        self.records()
            .find(|r| r.id == id)
            .ok_or_else(|| RecordsError::record_not_found(id))
    }

    fn record_mut(&mut self, id: &str) -> Result<&mut Record> {
        self.sets
            .iter_mut()
            .flat_map(|set| set.records.iter_mut())
            .find(|r| r.id == id)
            .ok_or_else(|| RecordsError::record_not_found(id))
    }
}
