//! Form builder session and the commands that drive it

pub mod command;
pub mod form_builder;

pub use command::{load_script, parse_script, Command, CommandOutput, ScriptError};
pub use form_builder::FormBuilder;

/// Tracing target for user-action events
pub const ACTIVITY_TARGET: &str = "activity";
