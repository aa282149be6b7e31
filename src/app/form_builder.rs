//! Form builder session
//!
//! Owns one schema store, one data store and one edit controller, and routes
//! every user action to the right one. Each call runs to completion before
//! the next; there is nothing to lock.

use chrono::Utc;

use super::ACTIVITY_TARGET;
use crate::config::{Config, ValidationKey};
use crate::edit_mode::{EditModeController, EditState};
use crate::model::{FieldDefinition, FieldId, FieldType, FieldUpdate, FieldValue, FormData};
use crate::registry::FieldTypeRegistry;
use crate::schema::FieldSchemaStore;
use crate::state::FormDataStore;
use crate::{submission, visibility};

#[derive(Debug, Clone)]
pub struct FormBuilder {
    config: Config,
    schema: FieldSchemaStore,
    data: FormDataStore,
    edit: EditModeController,
    submitted: Option<FormData>,
}

impl Default for FormBuilder {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl FormBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            schema: FieldSchemaStore::new(FieldTypeRegistry::new(config.ids.strategy)),
            data: FormDataStore::new(),
            edit: EditModeController::new(config.edit.policy),
            submitted: None,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn schema(&self) -> &FieldSchemaStore {
        &self.schema
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        self.schema.fields()
    }

    pub fn data(&self) -> &FormDataStore {
        &self.data
    }

    pub fn edit_state(&self) -> &EditState {
        self.edit.state()
    }

    pub fn edit_mode(&self) -> &EditModeController {
        &self.edit
    }

    /// The snapshot taken by the most recent [`submit`](Self::submit)
    pub fn submitted(&self) -> Option<&FormData> {
        self.submitted.as_ref()
    }

    // Schema

    pub fn add_field(&mut self, field_type: FieldType) -> FieldId {
        let id = self.schema.add_field(field_type);
        tracing::info!(target: ACTIVITY_TARGET, field = %id, kind = %field_type, "add_field");
        id
    }

    pub fn add_field_tag(&mut self, tag: &str) -> Option<FieldId> {
        let id = self.schema.add_field_tag(tag)?;
        tracing::info!(target: ACTIVITY_TARGET, field = %id, kind = tag, "add_field");
        Some(id)
    }

    pub fn add_section(&mut self) -> FieldId {
        self.add_field(FieldType::Section)
    }

    pub fn add_nested_field(&mut self, section_id: &str, field_type: FieldType) -> Option<FieldId> {
        let id = self.schema.add_nested_field(section_id, field_type)?;
        tracing::info!(
            target: ACTIVITY_TARGET,
            field = %id,
            kind = %field_type,
            section = section_id,
            "add_nested_field"
        );
        Some(id)
    }

    /// Delete a root field
    ///
    /// Entered values and errors stay behind unless `data.purge_on_delete`
    /// is set.
    pub fn delete_field(&mut self, id: &str) -> bool {
        let Some(removed) = self.schema.delete_field(id) else {
            return false;
        };
        tracing::info!(target: ACTIVITY_TARGET, field = id, "delete_field");

        if self.config.data.purge_on_delete {
            self.data.purge(id);
            for child in removed.fields().unwrap_or_default() {
                self.data.purge(child.id().as_str());
            }
        }
        true
    }

    pub fn edit_field(&mut self, id: &str, update: FieldUpdate) -> bool {
        let edited = self.schema.edit_field(id, update);
        if edited {
            tracing::info!(target: ACTIVITY_TARGET, field = id, "edit_field");
        }
        edited
    }

    // Edit mode

    pub fn begin_edit(&mut self, id: impl Into<FieldId>) {
        let id = id.into();
        tracing::info!(target: ACTIVITY_TARGET, field = %id, "begin_edit");
        self.edit.begin(id, &self.schema);
    }

    pub fn edit_label(&mut self, label: impl Into<String>) {
        self.edit.set_label(label, &mut self.schema);
    }

    pub fn edit_options(&mut self, text: &str) {
        self.edit.set_options_text(text, &mut self.schema);
    }

    pub fn confirm_edit(&mut self) {
        tracing::info!(target: ACTIVITY_TARGET, "confirm_edit");
        self.edit.confirm(&mut self.schema);
    }

    pub fn cancel_edit(&mut self) {
        tracing::info!(target: ACTIVITY_TARGET, "cancel_edit");
        self.edit.cancel();
    }

    // Values

    /// Record a value the user entered, validating it first
    pub fn change_value(&mut self, field_id: &str, value: FieldValue, parent_id: Option<&str>) {
        let rule_key = match self.config.validation.key {
            ValidationKey::Identity => field_id,
            ValidationKey::FieldType => self
                .schema
                .find(field_id)
                .map(|f| f.field_type().as_str())
                .unwrap_or(field_id),
        };
        tracing::info!(target: ACTIVITY_TARGET, field = field_id, parent = ?parent_id, "change_value");
        self.data
            .set_value_checked(field_id, rule_key, value, parent_id, Utc::now());
    }

    pub fn value(&self, field_id: &str, parent_id: Option<&str>) -> Option<&FieldValue> {
        self.data.lookup(field_id, parent_id)
    }

    pub fn error(&self, field_id: &str) -> Option<&str> {
        self.data.error(field_id)
    }

    // Rendering and submission

    pub fn is_visible(&self, field: &FieldDefinition) -> bool {
        visibility::is_visible(field, self.data.data())
    }

    /// Root fields to render, in order
    pub fn visible_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        visibility::visible_fields(self.schema.fields(), self.data.data())
    }

    /// Take a snapshot of the current values; errors do not block it
    pub fn submit(&mut self) -> FormData {
        tracing::info!(target: ACTIVITY_TARGET, "submit");
        let snapshot = submission::submit(&self.data);
        self.submitted = Some(snapshot.clone());
        snapshot
    }
}
