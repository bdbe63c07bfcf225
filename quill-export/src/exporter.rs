//! Exporter — renders the record set through a template.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use quill_fields::FieldRegistry;
use quill_records::{RecordFieldValueMap, RecordStore};
use quill_types::{builtin, TypeSystem, Value};
use tracing::debug;

use crate::error::{ExportError, Result};
use crate::template::{placeholder, RecordExportTemplate};

/// Pure read pass over the record store: resolves each record's field set,
/// substitutes placeholders, and writes the complete artifact in one pass.
pub struct Exporter<'a, 's> {
    store: &'a RecordStore<'s>,
    fields: &'a FieldRegistry,
    types: &'a TypeSystem,
}

impl<'a, 's> Exporter<'a, 's> {
    pub fn new(
        store: &'a RecordStore<'s>,
        fields: &'a FieldRegistry,
        types: &'a TypeSystem,
    ) -> Self {
        Self {
            store,
            fields,
            types,
        }
    }

    /// Render the full record set to a string.
    ///
    /// Records without any explicit field value contribute nothing —
    /// pure-inheritance records are omitted from the output entirely.
    pub fn render(&self, template: &RecordExportTemplate) -> Result<String> {
        let mut records_string = String::new();

        let sets = self.store.record_sets();
        let field_definitions = self.fields.get_field_definitions();

        for (set_index, set) in sets.iter().enumerate() {
            for (record_index, record) in set.records.iter().enumerate() {
                if record.field_values.is_empty() {
                    continue;
                }

                // Resolve the field set to render.
                let field_values: RecordFieldValueMap = if template.export_as_table {
                    // Fixed-width table: every registry field, empty text
                    // where the record defines nothing explicitly.
                    field_definitions
                        .iter()
                        .map(|field| {
                            let value = record
                                .field_values
                                .get(&field.id)
                                .cloned()
                                .unwrap_or_default();
                            (field.id.clone(), value)
                        })
                        .collect()
                } else {
                    self.store.get_record_field_values(&record.id)?
                };

                let mut fields_string = String::new();
                for (index, (field_id, value)) in field_values.iter().enumerate() {
                    fields_string.push_str(&self.render_field(template, field_id, value)?);
                    if index < field_values.len() - 1 {
                        fields_string.push_str(&template.field_value_delimiter);
                    }
                }

                let components_string = self.render_components(template, record.field_values.keys())?;

                let record_string = template
                    .record_template
                    .replace(placeholder::RECORD_ID, &record.id)
                    .replace(placeholder::RECORD_PARENT, &record.parent_id)
                    .replace(placeholder::RECORD_FIELDS, &fields_string)
                    .replace(placeholder::COMPONENTS, &components_string);
                records_string.push_str(&record_string);

                if record_index < set.records.len() - 1 || set_index < sets.len() - 1 {
                    records_string.push_str(&template.record_delimiter);
                }
            }
        }

        Ok(template
            .record_file_template
            .replace(placeholder::RECORDS, &records_string))
    }

    /// Render the record set and write it to the given sink.
    pub fn export_records<W: Write>(
        &self,
        template: &RecordExportTemplate,
        writer: &mut W,
    ) -> Result<()> {
        let artifact = self.render(template)?;
        writer.write_all(artifact.as_bytes())?;
        Ok(())
    }

    /// Render the record set and write it to a file, truncating any
    /// existing content. An unopenable destination fails with the path.
    pub fn export_to_file(
        &self,
        template: &RecordExportTemplate,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| ExportError::Destination {
            path: path.to_path_buf(),
            source,
        })?;

        let mut writer = BufWriter::new(file);
        self.export_records(template, &mut writer)?;
        writer.flush()?;

        debug!(path = %path.display(), "exported record file");
        Ok(())
    }

    /// Render one field, dispatching on its declared type: custom list
    /// types expand the list templates, built-in vector types the map
    /// templates, everything else the scalar field template.
    fn render_field(
        &self,
        template: &RecordExportTemplate,
        field_id: &str,
        value: &Value,
    ) -> Result<String> {
        let field = self.fields.get_field_definition(field_id)?;
        let field_type = field.field_type.as_str();

        let mut exported_type = template.mapped_type(field_type);
        let mut field_template = template.field_value_template.as_str();
        let mut value_text = value.as_text().to_string();

        if self.types.is_custom_type(field_type) {
            let custom = self.types.get_custom_type(field_type)?;

            if let Some(item_type) = custom.item_type() {
                field_template = template.list_template.as_str();
                exported_type = template.mapped_type(item_type);

                let items = value.items();
                value_text = String::new();
                for (index, item) in items.iter().enumerate() {
                    let item_string = template
                        .list_item_template
                        .replace(placeholder::FIELD_ID, field_id)
                        .replace(placeholder::FIELD_TYPE, &exported_type)
                        .replace(placeholder::LIST_ITEM, item.as_text());
                    value_text.push_str(&item_string);
                    if index < items.len() - 1 {
                        value_text.push_str(&template.list_item_delimiter);
                    }
                }
            }
        } else if builtin::is_vector(field_type) {
            field_template = template.map_template.as_str();

            let component_count = if builtin::is_three_component(field_type) {
                3
            } else {
                2
            };
            value_text = String::new();
            for index in 0..component_count {
                let component_string = template
                    .map_item_template
                    .replace(placeholder::FIELD_ID, field_id)
                    .replace(placeholder::FIELD_KEY, builtin::VECTOR_COMPONENTS[index])
                    .replace(placeholder::FIELD_VALUE, &value.component_text(index));
                value_text.push_str(&component_string);
                if index < component_count - 1 {
                    value_text.push_str(&template.map_item_delimiter);
                }
            }
        }

        Ok(field_template
            .replace(placeholder::FIELD_ID, field_id)
            .replace(placeholder::FIELD_TYPE, &exported_type)
            .replace(placeholder::FIELD_VALUE, &value_text))
    }

    /// Render the distinct, non-empty component names of the record's
    /// explicit fields, in first-seen order.
    fn render_components<'f>(
        &self,
        template: &RecordExportTemplate,
        explicit_field_ids: impl Iterator<Item = &'f String>,
    ) -> Result<String> {
        let mut components: Vec<&str> = Vec::new();
        for field_id in explicit_field_ids {
            let field = self.fields.get_field_definition(field_id)?;
            if !field.component.is_empty() && !components.contains(&field.component.as_str()) {
                components.push(&field.component);
            }
        }

        let mut components_string = String::new();
        for (index, component) in components.iter().enumerate() {
            components_string.push_str(
                &template
                    .component_template
                    .replace(placeholder::COMPONENT_NAME, component),
            );
            if index < components.len() - 1 {
                components_string.push_str(&template.component_delimiter);
            }
        }

        Ok(components_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_fields::FieldDefinition;
    use quill_records::RecordSetList;
    use quill_types::{CustomType, CustomTypeKind};

    fn registry() -> FieldRegistry {
        let mut fields = FieldRegistry::new();
        fields
            .add_field_definition(FieldDefinition::new("name", builtin::STRING))
            .unwrap();
        fields
            .add_field_definition(
                FieldDefinition::new("hp", builtin::INTEGER).with_component("Combat"),
            )
            .unwrap();
        fields
            .add_field_definition(
                FieldDefinition::new("loot", "ItemList").with_component("Inventory"),
            )
            .unwrap();
        fields
            .add_field_definition(FieldDefinition::new("position", builtin::VECTOR_2R))
            .unwrap();
        fields
            .add_field_definition(FieldDefinition::new("heading", builtin::VECTOR_3I))
            .unwrap();
        fields
    }

    fn type_system() -> TypeSystem {
        let mut types = TypeSystem::new();
        types
            .add_custom_type(CustomType {
                name: "ItemList".into(),
                type_set: String::new(),
                kind: CustomTypeKind::List {
                    item_type: builtin::INTEGER.into(),
                },
            })
            .unwrap();
        types
    }

    fn scalar_template() -> RecordExportTemplate {
        RecordExportTemplate {
            record_file_template: "$RECORDS$".into(),
            record_template: "[$RECORD_FIELDS$]".into(),
            field_value_template: "$FIELD_ID$:$FIELD_VALUE$;".into(),
            ..Default::default()
        }
    }

    #[test]
    fn scalar_field_renders_through_field_template() {
        let mut sets = RecordSetList::new();
        let fields = registry();
        let types = type_system();
        let mut store = RecordStore::new(&mut sets, &fields);
        store.add_record("hero", "Hero");
        store
            .update_record_field_value("hero", "name", Value::from("Hero"))
            .unwrap();

        let exporter = Exporter::new(&store, &fields, &types);
        let output = exporter.render(&scalar_template()).unwrap();
        assert_eq!(output, "[name:Hero;]");
    }

    #[test]
    fn pure_inheritance_records_are_omitted() {
        let mut sets = RecordSetList::new();
        let fields = registry();
        let types = type_system();
        let mut store = RecordStore::new(&mut sets, &fields);
        store.add_record("monster", "Monster");
        store.add_record("wolf", "Wolf");
        store.reparent_record("wolf", "monster").unwrap();
        store
            .update_record_field_value("monster", "name", Value::from("Monster"))
            .unwrap();

        // Wolf inherits a name but defines nothing explicitly.
        let exporter = Exporter::new(&store, &fields, &types);
        let output = exporter.render(&scalar_template()).unwrap();
        assert_eq!(output, "[name:Monster;]");
    }

    #[test]
    fn list_field_expands_item_template() {
        let mut sets = RecordSetList::new();
        let fields = registry();
        let types = type_system();
        let mut store = RecordStore::new(&mut sets, &fields);
        store.add_record("chest", "Chest");
        store
            .update_record_field_value(
                "chest",
                "loot",
                Value::List(vec!["1".into(), "2".into(), "3".into()]),
            )
            .unwrap();

        let template = RecordExportTemplate {
            record_file_template: "$RECORDS$".into(),
            record_template: "$RECORD_FIELDS$".into(),
            list_template: "($FIELD_VALUE$)".into(),
            list_item_template: "$LIST_ITEM$,".into(),
            ..Default::default()
        };

        let exporter = Exporter::new(&store, &fields, &types);
        let output = exporter.render(&template).unwrap();
        assert_eq!(output, "(1,2,3,)");
    }

    #[test]
    fn list_item_type_is_mapped_through_type_map() {
        let mut sets = RecordSetList::new();
        let fields = registry();
        let types = type_system();
        let mut store = RecordStore::new(&mut sets, &fields);
        store.add_record("chest", "Chest");
        store
            .update_record_field_value("chest", "loot", Value::List(vec!["7".into()]))
            .unwrap();

        let mut template = RecordExportTemplate {
            record_file_template: "$RECORDS$".into(),
            record_template: "$RECORD_FIELDS$".into(),
            list_template: "$FIELD_TYPE$[$FIELD_VALUE$]".into(),
            list_item_template: "$FIELD_TYPE$:$LIST_ITEM$".into(),
            list_item_delimiter: " ".into(),
            ..Default::default()
        };
        template
            .type_map
            .insert(builtin::INTEGER.to_string(), "int".to_string());

        let exporter = Exporter::new(&store, &fields, &types);
        let output = exporter.render(&template).unwrap();
        assert_eq!(output, "int[int:7]");
    }

    #[test]
    fn two_component_vector_expands_x_and_y() {
        let mut sets = RecordSetList::new();
        let fields = registry();
        let types = type_system();
        let mut store = RecordStore::new(&mut sets, &fields);
        store.add_record("hero", "Hero");
        store
            .update_record_field_value("hero", "position", Value::Vector(vec![1.5, 2.0]))
            .unwrap();

        let template = RecordExportTemplate {
            record_file_template: "$RECORDS$".into(),
            record_template: "$RECORD_FIELDS$".into(),
            map_template: "{$FIELD_VALUE$}".into(),
            map_item_template: "$FIELD_KEY$=$FIELD_VALUE$".into(),
            map_item_delimiter: ",".into(),
            ..Default::default()
        };

        let exporter = Exporter::new(&store, &fields, &types);
        let output = exporter.render(&template).unwrap();
        assert_eq!(output, "{X=1.5,Y=2}");
    }

    #[test]
    fn three_component_vector_includes_z() {
        let mut sets = RecordSetList::new();
        let fields = registry();
        let types = type_system();
        let mut store = RecordStore::new(&mut sets, &fields);
        store.add_record("hero", "Hero");
        store
            .update_record_field_value("hero", "heading", Value::Vector(vec![0.0, 1.0, -1.0]))
            .unwrap();

        let template = RecordExportTemplate {
            record_file_template: "$RECORDS$".into(),
            record_template: "$RECORD_FIELDS$".into(),
            map_template: "{$FIELD_VALUE$}".into(),
            map_item_template: "$FIELD_KEY$=$FIELD_VALUE$".into(),
            map_item_delimiter: ",".into(),
            ..Default::default()
        };

        let exporter = Exporter::new(&store, &fields, &types);
        let output = exporter.render(&template).unwrap();
        assert_eq!(output, "{X=0,Y=1,Z=-1}");
    }

    #[test]
    fn record_delimiter_between_records_not_after_last() {
        let mut sets = RecordSetList::new();
        let fields = registry();
        let types = type_system();
        let mut store = RecordStore::new(&mut sets, &fields);
        store.add_record("bat", "Bat");
        store.add_record("wolf", "Wolf");
        store
            .update_record_field_value("bat", "name", Value::from("Bat"))
            .unwrap();
        store
            .update_record_field_value("wolf", "name", Value::from("Wolf"))
            .unwrap();

        let template = RecordExportTemplate {
            record_file_template: "$RECORDS$".into(),
            record_template: "$RECORD_ID$".into(),
            record_delimiter: "\n".into(),
            ..Default::default()
        };

        let exporter = Exporter::new(&store, &fields, &types);
        let output = exporter.render(&template).unwrap();
        assert_eq!(output, "bat\nwolf");
    }

    #[test]
    fn record_template_substitutes_id_and_parent() {
        let mut sets = RecordSetList::new();
        let fields = registry();
        let types = type_system();
        let mut store = RecordStore::new(&mut sets, &fields);
        store.add_record("monster", "Monster");
        store.add_record("wolf", "Wolf");
        store.reparent_record("wolf", "monster").unwrap();
        store
            .update_record_field_value("wolf", "name", Value::from("Wolf"))
            .unwrap();

        let template = RecordExportTemplate {
            record_file_template: "$RECORDS$".into(),
            record_template: "<$RECORD_ID$ parent=\"$RECORD_PARENT$\"/>".into(),
            ..Default::default()
        };

        let exporter = Exporter::new(&store, &fields, &types);
        let output = exporter.render(&template).unwrap();
        assert_eq!(output, "<wolf parent=\"monster\"/>");
    }

    #[test]
    fn components_from_explicit_fields_only_deduped() {
        let mut sets = RecordSetList::new();
        let fields = registry();
        let types = type_system();
        let mut store = RecordStore::new(&mut sets, &fields);
        store.add_record("monster", "Monster");
        store.add_record("wolf", "Wolf");
        store.reparent_record("wolf", "monster").unwrap();
        // Inherited field with the Inventory component must not register.
        store
            .update_record_field_value("monster", "loot", Value::List(vec![]))
            .unwrap();
        store
            .update_record_field_value("wolf", "hp", Value::from("25"))
            .unwrap();
        store
            .update_record_field_value("wolf", "name", Value::from("Wolf"))
            .unwrap();

        let template = RecordExportTemplate {
            record_file_template: "$RECORDS$".into(),
            record_template: "$RECORD_ID$<$COMPONENTS$>".into(),
            record_delimiter: " ".into(),
            component_template: "$COMPONENT_NAME$".into(),
            component_delimiter: "+".into(),
            ..Default::default()
        };

        let exporter = Exporter::new(&store, &fields, &types);
        let output = exporter.render(&template).unwrap();
        assert_eq!(output, "monster<Inventory> wolf<Combat>");
    }

    #[test]
    fn table_mode_pads_unset_fields_with_empty_text() {
        let mut sets = RecordSetList::new();
        let fields = registry();
        let types = type_system();
        let mut store = RecordStore::new(&mut sets, &fields);
        store.add_record("wolf", "Wolf");
        store
            .update_record_field_value("wolf", "name", Value::from("Wolf"))
            .unwrap();

        let template = RecordExportTemplate {
            record_file_template: "$RECORDS$".into(),
            record_template: "$RECORD_FIELDS$".into(),
            field_value_template: "$FIELD_VALUE$".into(),
            field_value_delimiter: ";".into(),
            export_as_table: true,
            ..Default::default()
        };

        // Registry order sorted by id: heading, hp, loot, name, position.
        // Only "name" is set; list/vector templates are empty fragments.
        let exporter = Exporter::new(&store, &fields, &types);
        let output = exporter.render(&template).unwrap();
        assert_eq!(output, ";;;Wolf;");
    }

    #[test]
    fn unknown_placeholders_stay_literal() {
        let mut sets = RecordSetList::new();
        let fields = registry();
        let types = type_system();
        let mut store = RecordStore::new(&mut sets, &fields);
        store.add_record("hero", "Hero");
        store
            .update_record_field_value("hero", "name", Value::from("Hero"))
            .unwrap();

        let template = RecordExportTemplate {
            record_file_template: "$RECORDS$ $NOT_A_TOKEN$".into(),
            record_template: "$RECORD_FIELDS$".into(),
            field_value_template: "$FIELD_VALUE$".into(),
            ..Default::default()
        };

        let exporter = Exporter::new(&store, &fields, &types);
        let output = exporter.render(&template).unwrap();
        assert_eq!(output, "Hero $NOT_A_TOKEN$");
    }

    #[test]
    fn export_to_file_truncates_and_writes() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("records.txt");
        std::fs::write(&path, "stale content that should vanish").unwrap();

        let mut sets = RecordSetList::new();
        let fields = registry();
        let types = type_system();
        let mut store = RecordStore::new(&mut sets, &fields);
        store.add_record("hero", "Hero");
        store
            .update_record_field_value("hero", "name", Value::from("Hero"))
            .unwrap();

        let exporter = Exporter::new(&store, &fields, &types);
        exporter.export_to_file(&scalar_template(), &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[name:Hero;]");
    }

    #[test]
    fn unwritable_destination_fails_with_path() {
        let mut sets = RecordSetList::new();
        let fields = registry();
        let types = type_system();
        let store = RecordStore::new(&mut sets, &fields);

        let exporter = Exporter::new(&store, &fields, &types);
        let err = exporter
            .export_to_file(&scalar_template(), "/no/such/dir/out.txt")
            .unwrap_err();
        assert!(matches!(err, ExportError::Destination { .. }));
    }
}
