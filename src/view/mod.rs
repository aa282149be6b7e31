//! View layer
//!
//! - `field_view.rs` - project a session into per-field display state
//! - `render.rs` - plain text rendering of that state

pub mod field_view;
pub mod render;

pub use field_view::{build, phone_country_key, FieldControl, FieldView, ViewServices};
pub use render::render_text;
