// CLI tests - run the dynform binary against scripts on disk

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const CONTACT_SCRIPT: &str = r#"{"op": "add_field", "field_type": "text"}
{"op": "add_field", "field_type": "radio"}
{"op": "set_value", "field": "field-1", "value": "Ada"}
{"op": "submit"}
{"op": "set_value", "field": "field-2", "value": "No"}
{"op": "submit"}
"#;

/// Temp dir holding a script, also used as the config and data home
struct Workspace {
    dir: TempDir,
    script: PathBuf,
}

impl Workspace {
    fn new(script: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.jsonl");
        std::fs::write(&path, script).unwrap();
        Self { dir, script: path }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn run(&self, extra: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_dynform"))
            .arg(&self.script)
            .args(extra)
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            .env("XDG_DATA_HOME", self.path().join("data"))
            .env_remove("RUST_LOG")
            .output()
            .unwrap()
    }
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8(output.stdout.clone())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_prints_each_submission_as_json_line() {
    let ws = Workspace::new(CONTACT_SCRIPT);
    let output = ws.run(&[]);
    assert!(output.status.success(), "{:?}", output);

    let submissions: Vec<serde_json::Value> = stdout_lines(&output)
        .iter()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(
        submissions,
        vec![
            serde_json::json!({"field-1": "Ada"}),
            serde_json::json!({"field-1": "Ada", "field-2": "No"}),
        ]
    );
}

#[test]
fn test_schema_flag_prints_field_tree() {
    let ws = Workspace::new(
        r#"{"op": "add_section"}
{"op": "add_nested_field", "section": "field-1", "field_type": "phone"}
"#,
    );
    let output = ws.run(&["--schema"]);
    assert!(output.status.success(), "{:?}", output);

    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        schema,
        serde_json::json!([{
            "id": "field-1",
            "type": "section",
            "label": "Section",
            "fields": [{"id": "field-2", "type": "phone", "label": "Phone Number"}],
        }])
    );
}

#[test]
fn test_render_flag_prints_form() {
    let ws = Workspace::new(CONTACT_SCRIPT);
    let output = ws.run(&["--render"]);
    assert!(output.status.success(), "{:?}", output);

    let lines = stdout_lines(&output);
    assert_eq!(
        &lines[2..],
        &[
            "[field-1] Text Field: Ada".to_string(),
            "[field-2] Radio Button: [ ] Yes, [x] No".to_string(),
        ]
    );
}

#[test]
fn test_config_file_is_applied() {
    let ws = Workspace::new(
        r#"{"op": "add_field", "field_type": "text"}
{"op": "set_value", "field": "field-1", "value": "gone"}
{"op": "delete_field", "id": "field-1"}
{"op": "submit"}
"#,
    );
    let config = ws.path().join("purge.json");
    std::fs::write(&config, r#"{"data": {"purge_on_delete": true}}"#).unwrap();

    let output = ws.run(&["--config", config.to_str().unwrap()]);
    assert!(output.status.success(), "{:?}", output);
    assert_eq!(stdout_lines(&output), vec!["{}".to_string()]);

    // Without it the value lingers
    let output = ws.run(&[]);
    assert_eq!(stdout_lines(&output), vec![r#"{"field-1":"gone"}"#.to_string()]);
}

#[test]
fn test_activity_log_to_given_path() {
    let ws = Workspace::new(CONTACT_SCRIPT);
    let log = ws.path().join("logs").join("actions.log");

    let output = ws.run(&["--activity-log", log.to_str().unwrap()]);
    assert!(output.status.success(), "{:?}", output);

    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(contents.contains("add_field field=field-1 kind=text"), "{}", contents);
    assert_eq!(contents.lines().filter(|l| l.ends_with(" submit")).count(), 2);
}

#[test]
fn test_activity_log_without_path_uses_data_dir() {
    let ws = Workspace::new(CONTACT_SCRIPT);

    let output = ws.run(&["--activity-log"]);
    assert!(output.status.success(), "{:?}", output);

    let log = ws.path().join("data").join("dynform").join("activity.log");
    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(contents.contains("change_value"), "{}", contents);
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("activity.log"), "{}", stderr);
}

#[test]
fn test_bad_script_line_fails() {
    let ws = Workspace::new("{\"op\": \"add_section\"}\n{\"op\": \"explode\"}\n");
    let output = ws.run(&[]);
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("line 2"), "{}", stderr);
}
