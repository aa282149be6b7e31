//! Field type templates and id generation

use crate::config::IdStrategy;
use crate::model::{FieldDefinition, FieldId, FieldType};

/// Default attributes a new field of some type starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTemplate {
    pub field_type: FieldType,
    pub label: &'static str,
    pub options: &'static [&'static str],
}

static TEMPLATES: [FieldTemplate; 9] = [
    FieldTemplate {
        field_type: FieldType::Text,
        label: "Text Field",
        options: &[],
    },
    FieldTemplate {
        field_type: FieldType::Dropdown,
        label: "Dropdown",
        options: &["Option 1", "Option 2"],
    },
    FieldTemplate {
        field_type: FieldType::Radio,
        label: "Radio Button",
        options: &["Yes", "No"],
    },
    FieldTemplate {
        field_type: FieldType::File,
        label: "File Upload",
        options: &[],
    },
    FieldTemplate {
        field_type: FieldType::Checkbox,
        label: "Checkbox",
        options: &["Option 1", "Option 2"],
    },
    FieldTemplate {
        field_type: FieldType::Country,
        label: "Country",
        options: &[],
    },
    FieldTemplate {
        field_type: FieldType::Date,
        label: "Date Picker",
        options: &[],
    },
    FieldTemplate {
        field_type: FieldType::Phone,
        label: "Phone Number",
        options: &[],
    },
    FieldTemplate {
        field_type: FieldType::Section,
        label: "Section",
        options: &[],
    },
];

/// Hands out field ids that are unique for the lifetime of the generator
#[derive(Debug, Clone)]
pub enum IdGenerator {
    Sequential { next: u64 },
    Uuid,
}

impl IdGenerator {
    pub fn new(strategy: IdStrategy) -> Self {
        match strategy {
            IdStrategy::Sequential => IdGenerator::Sequential { next: 1 },
            IdStrategy::Uuid => IdGenerator::Uuid,
        }
    }

    pub fn next_id(&mut self) -> FieldId {
        match self {
            IdGenerator::Sequential { next } => {
                let id = FieldId::new(format!("field-{}", next));
                *next += 1;
                id
            }
            IdGenerator::Uuid => FieldId::new(uuid::Uuid::new_v4().to_string()),
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}

/// Static catalogue of field templates
///
/// Stamps each new field with an id from its [`IdGenerator`].
#[derive(Debug, Clone, Default)]
pub struct FieldTypeRegistry {
    ids: IdGenerator,
}

impl FieldTypeRegistry {
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            ids: IdGenerator::new(strategy),
        }
    }

    pub fn template(field_type: FieldType) -> &'static FieldTemplate {
        // TEMPLATES is declared in FieldType variant order
        &TEMPLATES[field_type as usize]
    }

    pub fn templates() -> &'static [FieldTemplate] {
        &TEMPLATES
    }

    /// Build a new field from the template for `field_type` with a fresh id
    pub fn instantiate(&mut self, field_type: FieldType) -> FieldDefinition {
        let template = Self::template(field_type);
        FieldDefinition::new(
            self.ids.next_id(),
            field_type,
            template.label,
            template.options.iter().map(|o| o.to_string()).collect(),
        )
    }
}
