//! Per-render projection of a form session
//!
//! Decides, for every visible field, whether the edit panel or the normal
//! control is shown, what value it displays, and which error line goes
//! under it. Nothing here mutates the session.

use serde::Serialize;

use crate::app::FormBuilder;
use crate::edit_mode::EditDraft;
use crate::model::{FieldDefinition, FieldId, FieldType, FieldValue};
use crate::services::countries;
use crate::services::file_preview::{BlobUrlPreview, FilePreview};
use crate::services::phone_format::{InternationalFormatter, PhoneFormatter};

/// External services the view calls for display-only values
pub struct ViewServices {
    pub phone: Box<dyn PhoneFormatter>,
    pub preview: Box<dyn FilePreview>,
}

impl Default for ViewServices {
    fn default() -> Self {
        Self {
            phone: Box::new(InternationalFormatter),
            preview: Box::new(BlobUrlPreview::default()),
        }
    }
}

/// Key holding the country picked for a phone field
pub fn phone_country_key(field_id: &str) -> String {
    format!("{}-country", field_id)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum FieldControl {
    /// The field is in edit mode
    Editor {
        label: String,
        /// Options joined one per line, for option-bearing types
        options_text: Option<String>,
    },
    Input {
        value: Option<String>,
    },
    /// Dropdown, radio and checkbox
    Choice {
        options: Vec<String>,
        selected: Vec<String>,
    },
    File {
        name: Option<String>,
        preview: Option<String>,
    },
    Country {
        code: Option<String>,
        name: Option<String>,
    },
    Phone {
        raw: Option<String>,
        formatted: Option<String>,
    },
    Section {
        children: Vec<FieldView>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    pub id: FieldId,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(flatten)]
    pub control: FieldControl,
    pub error: Option<String>,
}

/// Only text and file controls have an error line
fn shows_error(field_type: FieldType) -> bool {
    matches!(field_type, FieldType::Text | FieldType::File)
}

/// Build the view of every visible root field
pub fn build(form: &FormBuilder, services: &ViewServices) -> Vec<FieldView> {
    form.visible_fields()
        .map(|field| build_field(form, services, field, None))
        .collect()
}

fn build_field(
    form: &FormBuilder,
    services: &ViewServices,
    field: &FieldDefinition,
    parent: Option<&str>,
) -> FieldView {
    let id = field.id().as_str();
    let field_type = field.field_type();

    let control = if form.edit_mode().is_editing(id) {
        editor(field, form.edit_mode().draft())
    } else {
        control(form, services, field, parent)
    };

    let error = match control {
        FieldControl::Editor { .. } => None,
        _ if shows_error(field_type) => form.error(id).map(str::to_string),
        _ => None,
    };

    FieldView {
        id: field.id().clone(),
        field_type,
        label: field.label.clone(),
        control,
        error,
    }
}

fn editor(field: &FieldDefinition, draft: Option<&EditDraft>) -> FieldControl {
    match draft {
        Some(draft) => FieldControl::Editor {
            label: draft.label.clone(),
            options_text: draft.options.as_ref().map(|o| o.join("\n")),
        },
        None => FieldControl::Editor {
            label: field.label.clone(),
            options_text: field.options().map(|o| o.join("\n")),
        },
    }
}

fn control(
    form: &FormBuilder,
    services: &ViewServices,
    field: &FieldDefinition,
    parent: Option<&str>,
) -> FieldControl {
    let id = field.id().as_str();
    let value = form.value(id, parent);
    let text = value.and_then(FieldValue::as_text).map(str::to_string);

    match field.field_type() {
        FieldType::Text | FieldType::Date => FieldControl::Input { value: text },
        FieldType::Dropdown | FieldType::Radio | FieldType::Checkbox => FieldControl::Choice {
            options: field.options().map(<[String]>::to_vec).unwrap_or_default(),
            selected: match value {
                Some(FieldValue::Selection(items)) => items.iter().cloned().collect(),
                Some(FieldValue::Text(s)) => vec![s.clone()],
                _ => Vec::new(),
            },
        },
        FieldType::File => match value {
            Some(FieldValue::File(file)) => FieldControl::File {
                name: Some(file.name.clone()),
                preview: Some(services.preview.preview_url(file)),
            },
            _ => FieldControl::File {
                name: None,
                preview: None,
            },
        },
        FieldType::Country => FieldControl::Country {
            name: text
                .as_deref()
                .and_then(countries::by_code)
                .map(|c| c.name.to_string()),
            code: text,
        },
        FieldType::Phone => {
            let country = form
                .value(&phone_country_key(id), parent)
                .and_then(FieldValue::as_text)
                .unwrap_or_default();
            FieldControl::Phone {
                formatted: text
                    .as_deref()
                    .filter(|raw| !raw.is_empty())
                    .map(|raw| services.phone.format(country, raw)),
                raw: text,
            }
        }
        FieldType::Section => FieldControl::Section {
            children: field
                .fields()
                .unwrap_or_default()
                .iter()
                .map(|child| build_field(form, services, child, Some(id)))
                .collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, EditPolicy};
    use crate::model::FileHandle;

    fn services() -> ViewServices {
        ViewServices::default()
    }

    #[test]
    fn test_empty_form_has_no_views() {
        assert!(build(&FormBuilder::default(), &services()).is_empty());
    }

    #[test]
    fn test_editing_field_shows_editor() {
        let mut form = FormBuilder::default();
        let id = form.add_field(FieldType::Checkbox);
        form.begin_edit(id.clone());

        let views = build(&form, &services());
        assert_eq!(
            views[0].control,
            FieldControl::Editor {
                label: "Checkbox".into(),
                options_text: Some("Option 1\nOption 2".into()),
            }
        );
    }

    #[test]
    fn test_staged_editor_shows_draft() {
        let mut config = Config::default();
        config.edit.policy = EditPolicy::Staged;
        let mut form = FormBuilder::new(config);
        let id = form.add_field(FieldType::Text);
        form.begin_edit(id);
        form.edit_label("Draft");

        let views = build(&form, &services());
        assert_eq!(views[0].label, "Text Field");
        assert_eq!(
            views[0].control,
            FieldControl::Editor {
                label: "Draft".into(),
                options_text: None,
            }
        );
    }

    #[test]
    fn test_errors_only_under_text_and_file() {
        // Ids are literal here so the rules fire
        let mut form = FormBuilder::default();
        form.change_value("email", "nope".into(), None);
        let text = form.add_field(FieldType::Text);
        form.change_value(text.as_str(), "fine".into(), None);

        let email = FieldDefinition::new("email".into(), FieldType::Text, "Email", vec![]);
        let checkbox = FieldDefinition::new("checkbox".into(), FieldType::Checkbox, "Pick", vec![]);
        form.change_value("checkbox", FieldValue::selection(Vec::<String>::new()), None);

        let email_view = build_field(&form, &services(), &email, None);
        assert_eq!(email_view.error.as_deref(), Some("Invalid email"));

        let checkbox_view = build_field(&form, &services(), &checkbox, None);
        assert_eq!(checkbox_view.error, None);
    }

    #[test]
    fn test_phone_is_formatted_with_picked_country() {
        let mut form = FormBuilder::default();
        let id = form.add_field(FieldType::Phone);
        form.change_value(&phone_country_key(id.as_str()), "US".into(), None);
        form.change_value(id.as_str(), "5551234567".into(), None);

        let views = build(&form, &services());
        let phone = views.iter().find(|v| v.id == id).unwrap();
        assert_eq!(
            phone.control,
            FieldControl::Phone {
                raw: Some("5551234567".into()),
                formatted: Some("+1 555 123 4567".into()),
            }
        );
    }

    #[test]
    fn test_nested_phone_reads_country_from_its_section() {
        let mut form = FormBuilder::default();
        let section = form.add_section();
        let phone = form
            .add_nested_field(section.as_str(), FieldType::Phone)
            .unwrap();
        let parent = Some(section.as_str());
        form.change_value(&phone_country_key(phone.as_str()), "GB".into(), parent);
        form.change_value(phone.as_str(), "2071234567".into(), parent);

        let views = build(&form, &services());
        let FieldControl::Section { children } = &views[0].control else {
            panic!("expected section");
        };
        assert_eq!(
            children[0].control,
            FieldControl::Phone {
                raw: Some("2071234567".into()),
                formatted: Some("+44 207 123 4567".into()),
            }
        );
    }

    #[test]
    fn test_file_gets_preview_reference() {
        let mut form = FormBuilder::default();
        let id = form.add_field(FieldType::File);
        form.change_value(
            id.as_str(),
            FileHandle::new("cat.png", 100, "image/png").into(),
            None,
        );

        let views = build(&form, &services());
        match &views[0].control {
            FieldControl::File { name, preview } => {
                assert_eq!(name.as_deref(), Some("cat.png"));
                assert!(preview.as_deref().unwrap().starts_with("blob:"));
            }
            other => panic!("expected file control, got {:?}", other),
        }
    }

    #[test]
    fn test_section_children_read_nested_values() {
        let mut form = FormBuilder::default();
        let section = form.add_section();
        let child = form
            .add_nested_field(section.as_str(), FieldType::Country)
            .unwrap();
        form.change_value(child.as_str(), "FR".into(), Some(section.as_str()));

        let views = build(&form, &services());
        let FieldControl::Section { children } = &views[0].control else {
            panic!("expected section");
        };
        assert_eq!(
            children[0].control,
            FieldControl::Country {
                code: Some("FR".into()),
                name: Some("France".into()),
            }
        );
    }
}
