//! Core data types: field definitions and entered values

pub mod field;
pub mod value;

pub use field::{Condition, FieldDefinition, FieldId, FieldType, FieldUpdate, UnknownFieldType};
pub use value::{Errors, FieldValue, FileHandle, FormData};
