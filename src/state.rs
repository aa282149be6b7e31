//! Form data store
//!
//! Holds entered values and the validation message of every field that has
//! been touched. Writes never fail; validation runs on every write and its
//! outcome is recorded separately.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::model::{Errors, FieldValue, FormData};
use crate::validation;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormDataStore {
    data: FormData,
    errors: Errors,
}

impl FormDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` for `field_id`, validating it under the same key
    ///
    /// With a `parent_id` the value lands in the parent's group, next to
    /// whatever siblings are already there.
    pub fn set_value(&mut self, field_id: &str, value: FieldValue, parent_id: Option<&str>) {
        self.set_value_checked(field_id, field_id, value, parent_id, Utc::now());
    }

    /// Like [`set_value`](Self::set_value), but validates under `rule_key`
    /// at the given time.
    pub fn set_value_checked(
        &mut self,
        field_id: &str,
        rule_key: &str,
        value: FieldValue,
        parent_id: Option<&str>,
        now: DateTime<Utc>,
    ) {
        let message = validation::validate_at(rule_key, &value, now);
        if !message.is_empty() {
            tracing::debug!("Field {} failed validation: {}", field_id, message);
        }
        self.errors.insert(field_id.to_string(), message);

        match parent_id {
            None => {
                self.data.insert(field_id.to_string(), value);
            }
            Some(parent) => {
                let entry = self
                    .data
                    .entry(parent.to_string())
                    .or_insert_with(|| FieldValue::Group(IndexMap::new()));
                if !matches!(entry, FieldValue::Group(_)) {
                    tracing::debug!("Replacing non-group value under {} with a group", parent);
                    *entry = FieldValue::Group(IndexMap::new());
                }
                if let FieldValue::Group(group) = entry {
                    group.insert(field_id.to_string(), value);
                }
            }
        }
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn get(&self, field_id: &str) -> Option<&FieldValue> {
        self.data.get(field_id)
    }

    /// Value of `field_id` stored under the group `parent_id`
    pub fn get_nested(&self, parent_id: &str, field_id: &str) -> Option<&FieldValue> {
        self.data.get(parent_id)?.as_group()?.get(field_id)
    }

    /// Value for a field, looking in the parent's group when there is one
    pub fn lookup(&self, field_id: &str, parent_id: Option<&str>) -> Option<&FieldValue> {
        match parent_id {
            Some(parent) => self.get_nested(parent, field_id),
            None => self.get(field_id),
        }
    }

    /// Every recorded message, including empty ones
    pub fn errors(&self) -> &Errors {
        &self.errors
    }

    /// The current message for `field_id`, if it has a non-empty one
    pub fn error(&self, field_id: &str) -> Option<&str> {
        self.errors
            .get(field_id)
            .map(String::as_str)
            .filter(|m| !m.is_empty())
    }

    pub fn has_errors(&self) -> bool {
        self.errors.values().any(|m| !m.is_empty())
    }

    /// Drop the value and error entries stored under `field_id`
    pub fn purge(&mut self, field_id: &str) {
        self.data.shift_remove(field_id);
        self.errors.shift_remove(field_id);
    }
}
