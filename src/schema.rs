//! Field schema store
//!
//! Owns the ordered list of root fields. Mutations only look at the root
//! level: `delete_field`, `edit_field` and `add_nested_field` never descend
//! into sections. A miss is a silent no-op.

use crate::model::{FieldDefinition, FieldId, FieldType, FieldUpdate};
use crate::registry::FieldTypeRegistry;

#[derive(Debug, Clone, Default)]
pub struct FieldSchemaStore {
    fields: Vec<FieldDefinition>,
    registry: FieldTypeRegistry,
}

impl FieldSchemaStore {
    pub fn new(registry: FieldTypeRegistry) -> Self {
        Self {
            fields: Vec::new(),
            registry,
        }
    }

    /// Root fields in render order
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Root field with the given id
    pub fn get(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id().as_str() == id)
    }

    /// Root field or a section child with the given id
    pub fn find(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find_map(|field| {
            if field.id().as_str() == id {
                return Some(field);
            }
            field
                .fields()
                .and_then(|children| children.iter().find(|c| c.id().as_str() == id))
        })
    }

    /// Append a new root field built from the type's template
    pub fn add_field(&mut self, field_type: FieldType) -> FieldId {
        let field = self.registry.instantiate(field_type);
        let id = field.id().clone();
        tracing::debug!("Added {} field {}", field_type, id);
        self.fields.push(field);
        id
    }

    /// Like [`add_field`](Self::add_field) but from a type tag; unknown tags
    /// are ignored.
    pub fn add_field_tag(&mut self, tag: &str) -> Option<FieldId> {
        match tag.parse::<FieldType>() {
            Ok(field_type) => Some(self.add_field(field_type)),
            Err(e) => {
                tracing::trace!("Ignoring add_field: {}", e);
                None
            }
        }
    }

    pub fn add_section(&mut self) -> FieldId {
        self.add_field(FieldType::Section)
    }

    /// Append a new field to the root-level section `section_id`
    ///
    /// Returns `None` (and changes nothing) when no root field has that id or
    /// the match is not a section.
    pub fn add_nested_field(&mut self, section_id: &str, field_type: FieldType) -> Option<FieldId> {
        let Some(index) = self.root_index(section_id) else {
            tracing::trace!("Ignoring add_nested_field: no root field {}", section_id);
            return None;
        };
        if !self.fields[index].field_type().is_section() {
            tracing::trace!("Ignoring add_nested_field: {} is not a section", section_id);
            return None;
        }

        let field = self.registry.instantiate(field_type);
        let id = field.id().clone();
        if let Some(children) = self.fields[index].fields_mut() {
            children.push(field);
        }
        tracing::debug!("Added {} field {} to section {}", field_type, id, section_id);
        Some(id)
    }

    /// Remove the root field `id` (a section goes with its children)
    ///
    /// Returns the removed field, or `None` for unknown and nested ids.
    pub fn delete_field(&mut self, id: &str) -> Option<FieldDefinition> {
        let Some(index) = self.root_index(id) else {
            tracing::trace!("Ignoring delete_field: no root field {}", id);
            return None;
        };
        let removed = self.fields.remove(index);
        tracing::debug!("Deleted field {}", id);
        Some(removed)
    }

    /// Shallow-merge `update` into the root field `id`
    ///
    /// Returns whether a field matched.
    pub fn edit_field(&mut self, id: &str, update: FieldUpdate) -> bool {
        match self.fields.iter_mut().find(|f| f.id().as_str() == id) {
            Some(field) => {
                field.apply(update);
                tracing::debug!("Edited field {}", id);
                true
            }
            None => {
                tracing::trace!("Ignoring edit_field: no root field {}", id);
                false
            }
        }
    }

    fn root_index(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id().as_str() == id)
    }
}
