//! Collaborators the form engine calls out to
//!
//! - `countries` - static country / calling-code table
//! - `phone_format` - display formatting for phone numbers
//! - `file_preview` - temporary references for uploaded files
//! - `activity_log` - tracing layer recording user actions (runtime only)

pub mod countries;
pub mod file_preview;
pub mod phone_format;

#[cfg(feature = "runtime")]
pub mod activity_log;
