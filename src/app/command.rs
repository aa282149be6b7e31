//! User actions as data
//!
//! Every button press, keystroke or file pick is one [`Command`]. A session
//! script is a list of them, either as a JSON array or one JSON object per
//! line.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::form_builder::FormBuilder;
use crate::model::{FieldId, FieldUpdate, FieldValue, FormData};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// `field_type` is a type tag; unknown tags do nothing
    AddField {
        field_type: String,
    },
    AddNestedField {
        section: String,
        field_type: String,
    },
    AddSection,
    DeleteField {
        id: String,
    },
    EditField {
        id: String,
        label: Option<String>,
        options: Option<Vec<String>>,
    },
    BeginEdit {
        id: String,
    },
    EditLabel {
        text: String,
    },
    /// One option per line
    EditOptions {
        text: String,
    },
    ConfirmEdit,
    CancelEdit,
    SetValue {
        field: String,
        value: FieldValue,
        parent: Option<String>,
    },
    Submit,
}

/// What applying a command produced
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    None,
    Created(FieldId),
    Submitted(FormData),
}

impl Command {
    pub fn apply(self, form: &mut FormBuilder) -> CommandOutput {
        match self {
            Command::AddField { field_type } => created(form.add_field_tag(&field_type)),
            Command::AddNestedField {
                section,
                field_type,
            } => created(
                field_type
                    .parse()
                    .ok()
                    .and_then(|t| form.add_nested_field(&section, t)),
            ),
            Command::AddSection => CommandOutput::Created(form.add_section()),
            Command::DeleteField { id } => {
                form.delete_field(&id);
                CommandOutput::None
            }
            Command::EditField { id, label, options } => {
                form.edit_field(
                    &id,
                    FieldUpdate {
                        label,
                        options,
                        ..FieldUpdate::default()
                    },
                );
                CommandOutput::None
            }
            Command::BeginEdit { id } => {
                form.begin_edit(id);
                CommandOutput::None
            }
            Command::EditLabel { text } => {
                form.edit_label(text);
                CommandOutput::None
            }
            Command::EditOptions { text } => {
                form.edit_options(&text);
                CommandOutput::None
            }
            Command::ConfirmEdit => {
                form.confirm_edit();
                CommandOutput::None
            }
            Command::CancelEdit => {
                form.cancel_edit();
                CommandOutput::None
            }
            Command::SetValue {
                field,
                value,
                parent,
            } => {
                form.change_value(&field, value, parent.as_deref());
                CommandOutput::None
            }
            Command::Submit => CommandOutput::Submitted(form.submit()),
        }
    }
}

fn created(id: Option<FieldId>) -> CommandOutput {
    id.map_or(CommandOutput::None, CommandOutput::Created)
}

/// Failure reading a command script
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read script {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid command list: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("invalid command on line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse a script: a JSON array of commands, or JSON lines
///
/// In JSON lines form, blank lines and lines starting with `#` are skipped.
pub fn parse_script(text: &str) -> Result<Vec<Command>, ScriptError> {
    if text.trim_start().starts_with('[') {
        return serde_json::from_str(text).map_err(ScriptError::Parse);
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| ScriptError::Line {
                line: index + 1,
                source,
            })
        })
        .collect()
}

pub fn load_script(path: &Path) -> Result<Vec<Command>, ScriptError> {
    let text = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileHandle;

    #[test]
    fn test_parse_json_lines() {
        let script = r#"
# build the form
{"op": "add_field", "field_type": "text"}
{"op": "add_section"}

{"op": "set_value", "field": "field-1", "value": "hello"}
{"op": "submit"}
"#;
        let commands = parse_script(script).unwrap();
        assert_eq!(
            commands,
            vec![
                Command::AddField {
                    field_type: "text".into()
                },
                Command::AddSection,
                Command::SetValue {
                    field: "field-1".into(),
                    value: "hello".into(),
                    parent: None,
                },
                Command::Submit,
            ]
        );
    }

    #[test]
    fn test_parse_array() {
        let script = r#"[
            {"op": "set_value", "field": "c", "value": ["Option 1"]},
            {"op": "set_value", "field": "f", "value": {"name": "a.pdf", "size": 3, "media_type": "application/pdf"}},
            {"op": "set_value", "field": "n", "value": "x", "parent": "s"}
        ]"#;
        let commands = parse_script(script).unwrap();
        assert_eq!(commands.len(), 3);
        assert_eq!(
            commands[0],
            Command::SetValue {
                field: "c".into(),
                value: FieldValue::selection(["Option 1"]),
                parent: None,
            }
        );
        assert_eq!(
            commands[1],
            Command::SetValue {
                field: "f".into(),
                value: FileHandle::new("a.pdf", 3, "application/pdf").into(),
                parent: None,
            }
        );
        assert_eq!(
            commands[2],
            Command::SetValue {
                field: "n".into(),
                value: "x".into(),
                parent: Some("s".into()),
            }
        );
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        let script = "{\"op\": \"add_section\"}\n{\"op\": \"explode\"}\n";
        match parse_script(script) {
            Err(ScriptError::Line { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected line error, got {:?}", other),
        }
    }

    #[test]
    fn test_apply_runs_a_session() {
        let mut form = FormBuilder::default();
        let script = r#"
{"op": "add_section"}
{"op": "add_nested_field", "section": "field-1", "field_type": "text"}
{"op": "add_field", "field_type": "hologram"}
{"op": "set_value", "field": "field-2", "value": "x", "parent": "field-1"}
{"op": "submit"}
"#;
        let outputs: Vec<_> = parse_script(script)
            .unwrap()
            .into_iter()
            .map(|c| c.apply(&mut form))
            .collect();

        assert_eq!(outputs[0], CommandOutput::Created("field-1".into()));
        assert_eq!(outputs[1], CommandOutput::Created("field-2".into()));
        assert_eq!(outputs[2], CommandOutput::None);
        match &outputs[4] {
            CommandOutput::Submitted(data) => assert_eq!(
                serde_json::to_value(data).unwrap(),
                serde_json::json!({"field-1": {"field-2": "x"}})
            ),
            other => panic!("expected submission, got {:?}", other),
        }
    }

    #[test]
    fn test_load_script_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_script(&dir.path().join("missing.jsonl")).unwrap_err();
        assert!(matches!(err, ScriptError::Io { .. }));
    }
}
