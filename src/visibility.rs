//! Conditional visibility

use crate::model::{FieldDefinition, FormData};

/// Whether `field` should be shown given the current form data
///
/// Fields without a condition are always visible.
pub fn is_visible(field: &FieldDefinition, data: &FormData) -> bool {
    field
        .condition
        .as_ref()
        .map_or(true, |condition| condition.evaluate(data))
}

/// The visible entries of `fields`, in order
///
/// Only the given level is filtered; section children are shown with their
/// section.
pub fn visible_fields<'a>(
    fields: &'a [FieldDefinition],
    data: &'a FormData,
) -> impl Iterator<Item = &'a FieldDefinition> + 'a {
    fields.iter().filter(move |f| is_visible(f, data))
}
