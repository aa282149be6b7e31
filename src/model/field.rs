//! Field definitions
//!
//! A form schema is an ordered list of [`FieldDefinition`]s. Sections carry
//! their own ordered list of children; every other type is a leaf.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::value::FormData;

/// Unique identifier for a field
///
/// Ids are assigned once when a field is created and never change. They are
/// opaque strings so that form data can be keyed by them directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for FieldId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::borrow::Borrow<str> for FieldId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// The kind of control a field renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Dropdown,
    Radio,
    File,
    Checkbox,
    Country,
    Date,
    Phone,
    Section,
}

impl FieldType {
    pub const ALL: [FieldType; 9] = [
        FieldType::Text,
        FieldType::Dropdown,
        FieldType::Radio,
        FieldType::File,
        FieldType::Checkbox,
        FieldType::Country,
        FieldType::Date,
        FieldType::Phone,
        FieldType::Section,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Dropdown => "dropdown",
            FieldType::Radio => "radio",
            FieldType::File => "file",
            FieldType::Checkbox => "checkbox",
            FieldType::Country => "country",
            FieldType::Date => "date",
            FieldType::Phone => "phone",
            FieldType::Section => "section",
        }
    }

    /// Whether fields of this type carry an `options` list
    pub fn has_options(self) -> bool {
        matches!(
            self,
            FieldType::Dropdown | FieldType::Radio | FieldType::Checkbox
        )
    }

    pub fn is_section(self) -> bool {
        self == FieldType::Section
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a type tag does not name a known field type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field type: {0}")]
pub struct UnknownFieldType(pub String);

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| UnknownFieldType(tag.to_string()))
    }
}

/// Visibility predicate attached to a field
///
/// Receives the full current form data. Two conditions compare equal only if
/// they are the same allocation.
#[derive(Clone)]
pub struct Condition(Arc<dyn Fn(&FormData) -> bool + Send + Sync>);

impl Condition {
    pub fn new(predicate: impl Fn(&FormData) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(predicate))
    }

    pub fn evaluate(&self, data: &FormData) -> bool {
        (self.0)(data)
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Condition(..)")
    }
}

impl PartialEq for Condition {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// One node of the form schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDefinition {
    id: FieldId,
    #[serde(rename = "type")]
    field_type: FieldType,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<FieldDefinition>>,
    #[serde(skip)]
    pub condition: Option<Condition>,
}

impl FieldDefinition {
    /// Build a definition, normalizing `options` and `fields` to what the
    /// type can carry.
    pub fn new(
        id: FieldId,
        field_type: FieldType,
        label: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        Self {
            id,
            field_type,
            label: label.into(),
            options: field_type.has_options().then_some(options),
            fields: field_type.is_section().then(Vec::new),
            condition: None,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn id(&self) -> &FieldId {
        &self.id
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn options(&self) -> Option<&[String]> {
        self.options.as_deref()
    }

    /// Children of a section; `None` for every other type
    pub fn fields(&self) -> Option<&[FieldDefinition]> {
        self.fields.as_deref()
    }

    pub(crate) fn fields_mut(&mut self) -> Option<&mut Vec<FieldDefinition>> {
        self.fields.as_mut()
    }

    /// Shallow merge: every key present in `update` overwrites, the rest stay.
    ///
    /// `options` is only taken by option-bearing types and `fields` only by
    /// sections; id and type cannot be changed.
    pub fn apply(&mut self, update: FieldUpdate) {
        if let Some(label) = update.label {
            self.label = label;
        }
        if let Some(options) = update.options {
            if self.field_type.has_options() {
                self.options = Some(options);
            }
        }
        if let Some(fields) = update.fields {
            if self.field_type.is_section() {
                self.fields = Some(fields);
            }
        }
        if let Some(condition) = update.condition {
            self.condition = Some(condition);
        }
    }
}

/// Partial attribute update for [`FieldDefinition::apply`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldUpdate {
    pub label: Option<String>,
    pub options: Option<Vec<String>>,
    pub fields: Option<Vec<FieldDefinition>>,
    pub condition: Option<Condition>,
}

impl FieldUpdate {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn options(options: Vec<String>) -> Self {
        Self {
            options: Some(options),
            ..Self::default()
        }
    }
}
