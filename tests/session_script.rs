// Script tests - whole sessions driven by command files

use dynform::app::{load_script, CommandOutput, FormBuilder};
use dynform::config::{Config, ValidationKey};
use dynform::view::{build, render_text, ViewServices};
use tempfile::TempDir;

fn run(form: &mut FormBuilder, script: &str) -> Vec<serde_json::Value> {
    dynform::app::parse_script(script)
        .unwrap()
        .into_iter()
        .filter_map(|command| match command.apply(form) {
            CommandOutput::Submitted(data) => Some(serde_json::to_value(data).unwrap()),
            _ => None,
        })
        .collect()
}

/// Build a small contact form from a file on disk and submit it twice
#[test]
fn test_contact_form_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("contact.jsonl");
    std::fs::write(
        &path,
        r#"{"op": "add_field", "field_type": "text"}
{"op": "add_field", "field_type": "country"}
{"op": "add_field", "field_type": "checkbox"}
{"op": "set_value", "field": "field-1", "value": "Ada"}
{"op": "submit"}
{"op": "set_value", "field": "field-2", "value": "GB"}
{"op": "set_value", "field": "field-3", "value": ["Option 2"]}
{"op": "submit"}
"#,
    )
    .unwrap();

    let mut form = FormBuilder::default();
    let submissions: Vec<_> = load_script(&path)
        .unwrap()
        .into_iter()
        .filter_map(|c| match c.apply(&mut form) {
            CommandOutput::Submitted(data) => Some(serde_json::to_value(data).unwrap()),
            _ => None,
        })
        .collect();

    assert_eq!(
        submissions,
        vec![
            serde_json::json!({"field-1": "Ada"}),
            serde_json::json!({"field-1": "Ada", "field-2": "GB", "field-3": ["Option 2"]}),
        ]
    );
}

/// Misses in the script leave the form untouched
#[test]
fn test_schema_misses_are_silent() {
    let mut form = FormBuilder::default();
    run(
        &mut form,
        r#"
{"op": "add_field", "field_type": "text"}
{"op": "add_section"}
{"op": "add_nested_field", "section": "field-1", "field_type": "text"}
{"op": "add_nested_field", "section": "nowhere", "field_type": "text"}
{"op": "add_nested_field", "section": "field-2", "field_type": "telepathy"}
{"op": "delete_field", "id": "nowhere"}
{"op": "edit_field", "id": "nowhere", "label": "X"}
"#,
    );

    let fields = form.fields();
    assert_eq!(fields.len(), 2);
    assert!(fields[1].fields().unwrap().is_empty());
}

/// Renaming a field through edit mode, as the user would
#[test]
fn test_edit_mode_session() {
    let mut form = FormBuilder::default();
    run(
        &mut form,
        r#"
{"op": "add_field", "field_type": "radio"}
{"op": "begin_edit", "id": "field-1"}
{"op": "edit_label", "text": "Newsletter?"}
{"op": "edit_options", "text": "Weekly\nMonthly\nNever"}
{"op": "confirm_edit"}
{"op": "set_value", "field": "field-1", "value": "Monthly"}
"#,
    );

    let rendered = render_text(&build(&form, &ViewServices::default()));
    assert_eq!(
        rendered,
        "[field-1] Newsletter?: [ ] Weekly, [x] Monthly, [ ] Never\n"
    );
}

/// With type-keyed validation, generated ids get checked too
#[test]
fn test_field_type_validation_from_config() {
    let config = Config::from_json(r#"{"validation": {"key": "field_type"}}"#).unwrap();
    assert_eq!(config.validation.key, ValidationKey::FieldType);
    let mut form = FormBuilder::new(config);

    let submissions = run(
        &mut form,
        r#"
{"op": "add_field", "field_type": "date"}
{"op": "set_value", "field": "field-1", "value": "2999-01-01"}
{"op": "submit"}
"#,
    );

    assert_eq!(form.error("field-1"), Some("Date cannot be in the future"));
    assert_eq!(submissions, vec![serde_json::json!({"field-1": "2999-01-01"})]);
}
