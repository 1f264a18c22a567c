//! Per-field validation messages.
//!
//! A field group holds at most one `.field-error` element. Showing an error
//! reuses it when present; clearing removes it.

#[cfg(test)]
#[path = "field_error_test.rs"]
mod field_error_test;

use super::document::{NodeId, create_with_class};
use crate::page::Page;

/// Show `message` under `input` and mark the input invalid.
///
/// Inputs outside any field group are still marked; only the message is
/// skipped.
pub fn show_field_error(page: &Page, input: NodeId, message: &str) {
    let doc = &page.doc;
    let config = &page.config;

    if let Some(group) = doc.closest_class(input, &config.classes.form_group) {
        let existing = doc.query_class_within(group, &config.classes.field_error);
        let annotation = existing.or_else(|| {
            let created = create_with_class(&**doc, "div", &config.classes.field_error)?;
            doc.set_style(created, "color", &config.error_color);
            doc.set_style(created, "font-size", "13px");
            doc.set_style(created, "margin-top", "4px");
            doc.append_child(group, created);
            Some(created)
        });
        if let Some(annotation) = annotation {
            doc.set_text(annotation, message);
        }
    }

    doc.set_style(input, "border-color", &config.error_color);
}

/// Remove the error message for `input` and reset its border.
pub fn clear_field_error(page: &Page, input: NodeId) {
    let doc = &page.doc;
    let classes = &page.config.classes;

    if let Some(annotation) = doc
        .closest_class(input, &classes.form_group)
        .and_then(|group| doc.query_class_within(group, &classes.field_error))
    {
        doc.remove(annotation);
    }
    doc.set_style(input, "border-color", "");
}
