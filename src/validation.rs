//! Per-field validation rules
//!
//! Rules are looked up by exact match on a key string. By default that key is
//! the field id, so the rules only fire for fields literally named `email`,
//! `phone`, `file`, `date` or `checkbox`. Messages are advisory; an empty
//! string means valid.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

use crate::model::FieldValue;

pub const INVALID_EMAIL: &str = "Invalid email";
pub const INVALID_PHONE: &str = "Invalid phone number";
pub const FILE_TOO_LARGE: &str = "File size should be less than 1MB";
pub const INVALID_FILE_TYPE: &str = "Invalid file type. Only JPEG, PNG, and PDF are allowed.";
pub const FUTURE_DATE: &str = "Date cannot be in the future";
pub const NOTHING_SELECTED: &str = "At least one option must be selected";

/// Largest accepted upload, in bytes
pub const MAX_FILE_SIZE: u64 = 1_048_576;

pub const ALLOWED_FILE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "application/pdf"];

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is valid"))
}

/// Validate `value` for the field keyed `key` against the current time
pub fn validate(key: &str, value: &FieldValue) -> String {
    validate_at(key, value, Utc::now())
}

/// Validate with an explicit notion of "now" for the date rule
pub fn validate_at(key: &str, value: &FieldValue, now: DateTime<Utc>) -> String {
    let message = match key {
        "email" => validate_email(value),
        "phone" => validate_phone(value),
        "file" => validate_file(value),
        "date" => validate_date(value, now),
        "checkbox" => validate_checkbox(value),
        _ => None,
    };
    message.map(str::to_string).unwrap_or_default()
}

fn validate_email(value: &FieldValue) -> Option<&'static str> {
    let ok = match value {
        FieldValue::Text(s) => s.contains('@'),
        FieldValue::Selection(items) => items.contains("@"),
        FieldValue::File(_) | FieldValue::Group(_) => false,
    };
    (!ok).then_some(INVALID_EMAIL)
}

fn validate_phone(value: &FieldValue) -> Option<&'static str> {
    let ok = match value {
        FieldValue::Text(s) => phone_pattern().is_match(s),
        // A single selected item is tested as its own text
        FieldValue::Selection(items) if items.len() == 1 => {
            items.iter().all(|s| phone_pattern().is_match(s))
        }
        _ => false,
    };
    (!ok).then_some(INVALID_PHONE)
}

fn validate_file(value: &FieldValue) -> Option<&'static str> {
    match value {
        FieldValue::Text(s) if s.is_empty() => None,
        FieldValue::File(file) => {
            // Both checks run; the type message wins when both fail
            let mut message = None;
            if file.size > MAX_FILE_SIZE {
                message = Some(FILE_TOO_LARGE);
            }
            if !ALLOWED_FILE_TYPES.contains(&file.media_type.as_str()) {
                message = Some(INVALID_FILE_TYPE);
            }
            message
        }
        // Anything else present has no usable media type
        _ => Some(INVALID_FILE_TYPE),
    }
}

fn validate_date(value: &FieldValue, now: DateTime<Utc>) -> Option<&'static str> {
    let text = match value {
        FieldValue::Text(s) => s.as_str(),
        FieldValue::Selection(items) if items.len() == 1 => items.first()?.as_str(),
        _ => return None,
    };
    let date = parse_date(text)?;
    (date > now).then_some(FUTURE_DATE)
}

fn validate_checkbox(value: &FieldValue) -> Option<&'static str> {
    let empty = match value {
        FieldValue::Selection(items) => items.is_empty(),
        FieldValue::Text(s) => s.is_empty(),
        FieldValue::File(_) | FieldValue::Group(_) => true,
    };
    empty.then_some(NOTHING_SELECTED)
}

/// Parse what a date input produces
///
/// Bare dates are taken as UTC midnight. Unparseable input yields `None`,
/// which the date rule treats as "not in the future".
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|dt| dt.and_utc())
}
