// Form builder library - exposes all core modules for testing

// Core modules at root level
pub mod config;
pub mod edit_mode;
pub mod registry;
pub mod schema;
pub mod state;
pub mod submission;
pub mod validation;
pub mod visibility;

// Organized modules
pub mod app;
pub mod model;
pub mod services;
pub mod view;

pub use app::{Command, FormBuilder};
pub use config::Config;
pub use model::{FieldDefinition, FieldId, FieldType, FieldUpdate, FieldValue, FileHandle, FormData};
