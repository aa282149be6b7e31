//! Plain text rendering of field views

use std::fmt::Write;

use super::field_view::{FieldControl, FieldView};

/// Render views as indented text, one field per line
///
/// ```text
/// [field-1] Text Field: hello
///   ! Invalid email
/// [field-2] Section
///   [field-3] Phone Number: 5551234567 (+1 555 123 4567)
/// ```
pub fn render_text(views: &[FieldView]) -> String {
    let mut out = String::new();
    for view in views {
        render_view(&mut out, view, 0);
    }
    out
}

fn render_view(out: &mut String, view: &FieldView, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{}[{}] {}", indent, view.id, view.label);

    match &view.control {
        FieldControl::Editor {
            label,
            options_text,
        } => {
            let _ = write!(out, " (editing) label={:?}", label);
            if let Some(options) = options_text {
                let _ = write!(out, " options={:?}", options);
            }
        }
        FieldControl::Input { value } => {
            if let Some(value) = value {
                let _ = write!(out, ": {}", value);
            }
        }
        FieldControl::Choice { options, selected } => {
            let marked: Vec<String> = options
                .iter()
                .map(|o| {
                    if selected.contains(o) {
                        format!("[x] {}", o)
                    } else {
                        format!("[ ] {}", o)
                    }
                })
                .collect();
            let _ = write!(out, ": {}", marked.join(", "));
        }
        FieldControl::File { name, preview } => {
            if let Some(name) = name {
                let _ = write!(out, ": {}", name);
            }
            if let Some(preview) = preview {
                let _ = write!(out, " <{}>", preview);
            }
        }
        FieldControl::Country { code, name } => match (code, name) {
            (Some(code), Some(name)) => {
                let _ = write!(out, ": {} ({})", name, code);
            }
            (Some(code), None) => {
                let _ = write!(out, ": {}", code);
            }
            _ => {}
        },
        FieldControl::Phone { raw, formatted } => {
            if let Some(raw) = raw {
                let _ = write!(out, ": {}", raw);
            }
            if let Some(formatted) = formatted {
                let _ = write!(out, " ({})", formatted);
            }
        }
        FieldControl::Section { .. } => {}
    }
    out.push('\n');

    if let Some(error) = &view.error {
        let _ = writeln!(out, "{}  ! {}", indent, error);
    }
    if let FieldControl::Section { children } = &view.control {
        for child in children {
            render_view(out, child, depth + 1);
        }
    }
}
