//! In-place edit mode
//!
//! At most one field is edited at a time. Under [`EditPolicy::Immediate`]
//! every attribute change is written straight to the schema, so confirm and
//! cancel are the same transition and nothing is ever reverted. Under
//! [`EditPolicy::Staged`] changes collect in a draft until confirm.

use crate::config::EditPolicy;
use crate::model::{FieldId, FieldUpdate};
use crate::schema::FieldSchemaStore;

/// Which field, if any, is being edited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing(FieldId),
}

/// Attribute values pending under the staged policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub label: String,
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct EditModeController {
    state: EditState,
    policy: EditPolicy,
    draft: Option<EditDraft>,
}

impl EditModeController {
    pub fn new(policy: EditPolicy) -> Self {
        Self {
            state: EditState::Idle,
            policy,
            draft: None,
        }
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn policy(&self) -> EditPolicy {
        self.policy
    }

    pub fn editing(&self) -> Option<&FieldId> {
        match &self.state {
            EditState::Editing(id) => Some(id),
            EditState::Idle => None,
        }
    }

    pub fn is_editing(&self, id: &str) -> bool {
        self.editing().is_some_and(|current| current.as_str() == id)
    }

    /// Pending attributes, staged policy only
    pub fn draft(&self) -> Option<&EditDraft> {
        self.draft.as_ref()
    }

    /// Start editing `id`, replacing any edit in progress
    ///
    /// The id is not checked against the schema; edits to a field the schema
    /// cannot find are dropped when they are applied.
    pub fn begin(&mut self, id: FieldId, schema: &FieldSchemaStore) {
        if self.policy == EditPolicy::Staged {
            self.draft = schema.find(id.as_str()).map(|field| EditDraft {
                label: field.label.clone(),
                options: field.options().map(<[String]>::to_vec),
            });
        }
        tracing::debug!("Editing field {}", id);
        self.state = EditState::Editing(id);
    }

    /// Change the label of the field being edited
    pub fn set_label(&mut self, label: impl Into<String>, schema: &mut FieldSchemaStore) {
        self.apply(FieldUpdate::label(label), schema);
    }

    /// Replace the options from text with one option per line
    pub fn set_options_text(&mut self, text: &str, schema: &mut FieldSchemaStore) {
        let options = text.split('\n').map(str::to_string).collect();
        self.apply(FieldUpdate::options(options), schema);
    }

    fn apply(&mut self, update: FieldUpdate, schema: &mut FieldSchemaStore) {
        let EditState::Editing(id) = &self.state else {
            tracing::trace!("Ignoring attribute edit outside edit mode");
            return;
        };
        match self.policy {
            EditPolicy::Immediate => {
                schema.edit_field(id.as_str(), update);
            }
            EditPolicy::Staged => {
                let Some(draft) = self.draft.as_mut() else {
                    return;
                };
                if let Some(label) = update.label {
                    draft.label = label;
                }
                if let (Some(options), Some(current)) = (update.options, draft.options.as_mut()) {
                    *current = options;
                }
            }
        }
    }

    /// Leave edit mode, merging the draft under the staged policy
    pub fn confirm(&mut self, schema: &mut FieldSchemaStore) {
        if let (EditState::Editing(id), Some(draft)) = (&self.state, self.draft.take()) {
            schema.edit_field(
                id.as_str(),
                FieldUpdate {
                    label: Some(draft.label),
                    options: draft.options,
                    ..FieldUpdate::default()
                },
            );
        }
        self.exit();
    }

    /// Leave edit mode, discarding the draft under the staged policy
    pub fn cancel(&mut self) {
        self.draft = None;
        self.exit();
    }

    fn exit(&mut self) {
        if let EditState::Editing(id) = &self.state {
            tracing::debug!("Finished editing field {}", id);
        }
        self.state = EditState::Idle;
    }
}
