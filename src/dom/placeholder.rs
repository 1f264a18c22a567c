//! Loading and error placeholders that replace a container's content.

#[cfg(test)]
#[path = "placeholder_test.rs"]
mod placeholder_test;

use super::document::{NodeId, create_with_class};
use crate::page::Page;

/// Replace everything in `container` with a loading indicator.
///
/// `text` defaults to the configured loading text (`Loading...`).
pub fn show_loading(page: &Page, container: NodeId, text: Option<&str>) {
    let text = text.unwrap_or(&page.config.loading_text);
    replace_with_message(page, container, &page.config.classes.loading, text);
}

/// Replace everything in `container` with an error message.
pub fn show_error(page: &Page, container: NodeId, message: &str) {
    replace_with_message(page, container, &page.config.classes.error, message);
}

fn replace_with_message(page: &Page, container: NodeId, class: &str, message: &str) {
    let doc = &page.doc;
    doc.clear_children(container);
    let Some(wrapper) = create_with_class(&**doc, "div", class) else { return };
    let Some(paragraph) = doc.create_element("p") else { return };
    doc.set_text(paragraph, message);
    doc.append_child(wrapper, paragraph);
    doc.append_child(container, wrapper);
}
