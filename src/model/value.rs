//! Entered values
//!
//! Form data is a two-level mapping: a top-level key holds either a plain
//! value or, for fields nested in a section, a group keyed by child id.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Opaque reference to an uploaded file
///
/// Only the metadata the validator and preview need is kept; the bytes stay
/// wherever the caller loaded them from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileHandle {
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// MIME type, e.g. `image/png`
    pub media_type: String,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, size: u64, media_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            media_type: media_type.into(),
        }
    }
}

/// A value held in [`FormData`]
///
/// Serialized untagged so a snapshot reads like plain JSON:
/// `{"f1": "hello", "s1": {"n1": "x"}, "c1": ["Option 1"]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text, dropdown, radio, date, country code and phone digits
    Text(String),
    /// Checkbox selections, in the order they were picked
    Selection(IndexSet<String>),
    File(FileHandle),
    /// Values of the fields nested in a section
    Group(IndexMap<String, FieldValue>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&IndexMap<String, FieldValue>> {
        match self {
            FieldValue::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn selection<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldValue::Selection(items.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<FileHandle> for FieldValue {
    fn from(handle: FileHandle) -> Self {
        FieldValue::File(handle)
    }
}

/// Entered values keyed by field id, in first-write order
pub type FormData = IndexMap<String, FieldValue>;

/// Validation messages keyed by field id; an empty message means valid
pub type Errors = IndexMap<String, String>;
