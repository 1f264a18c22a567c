//! [`Document`] over the live browser DOM via `web-sys`.
//!
//! An element gets a [`NodeId`] the first time it is seen: the id is
//! stamped on it as a `data-mule-node` attribute and the element is kept in
//! a map under that id. [`Document::remove`] evicts the element and its
//! descendants, and click targets that only a handler saw are released once
//! dispatch ends, so the map holds what the page helpers still address.
//! Requires a browser environment.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use super::document::{ClickHandler, ClickTarget, Document, NodeId};

const ID_ATTR: &str = "data-mule-node";

#[derive(Default)]
struct Registry {
    next: usize,
    elements: HashMap<usize, web_sys::Element>,
}

type Arena = Rc<RefCell<Registry>>;

/// Id for `element`, registering it on first sight. The flag is `true` when
/// this call did the registering.
fn register(arena: &Arena, element: &web_sys::Element) -> (NodeId, bool) {
    let mut registry = arena.borrow_mut();
    let stamped = element.get_attribute(ID_ATTR).and_then(|raw| raw.parse::<usize>().ok());
    // A cloned element carries its source's stamp, so the stamp alone is not proof.
    if let Some(id) = stamped {
        if registry.elements.get(&id) == Some(element) {
            return (NodeId(id), false);
        }
    }
    let id = registry.next;
    registry.next += 1;
    let _ = element.set_attribute(ID_ATTR, &id.to_string());
    registry.elements.insert(id, element.clone());
    (NodeId(id), true)
}

/// Drop `element` and every registered descendant from the map.
fn evict_tree(arena: &Arena, element: &web_sys::Element) {
    let mut doomed = vec![element.clone()];
    if let Ok(list) = element.query_selector_all(&format!("[{ID_ATTR}]")) {
        doomed.extend(
            (0..list.length())
                .filter_map(|i| list.item(i))
                .filter_map(|node| node.dyn_into::<web_sys::Element>().ok()),
        );
    }
    let mut registry = arena.borrow_mut();
    for element in doomed {
        if let Some(id) = element.get_attribute(ID_ATTR).and_then(|raw| raw.parse::<usize>().ok()) {
            if registry.elements.get(&id) == Some(&element) {
                registry.elements.remove(&id);
            }
        }
    }
}

/// Forget a click target that was registered only for one dispatch.
fn release(arena: &Arena, element: &web_sys::Element, id: NodeId) {
    arena.borrow_mut().elements.remove(&id.0);
    let _ = element.remove_attribute(ID_ATTR);
}

pub struct BrowserDocument {
    document: web_sys::Document,
    elements: Arena,
}

impl BrowserDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document, elements: Rc::default() }
    }

    pub fn id_of(&self, element: &web_sys::Element) -> NodeId {
        register(&self.elements, element).0
    }

    pub fn element(&self, node: NodeId) -> Option<web_sys::Element> {
        self.elements.borrow().elements.get(&node.0).cloned()
    }

    fn html_element(&self, node: NodeId) -> Option<web_sys::HtmlElement> {
        self.element(node)?.dyn_into::<web_sys::HtmlElement>().ok()
    }

    fn selector(class: &str) -> String {
        format!(".{class}")
    }
}

impl Document for BrowserDocument {
    fn head(&self) -> Option<NodeId> {
        let head: web_sys::Element = self.document.head()?.into();
        Some(self.id_of(&head))
    }

    fn body(&self) -> Option<NodeId> {
        let body: web_sys::Element = self.document.body()?.into();
        Some(self.id_of(&body))
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        match self.document.create_element(tag) {
            Ok(element) => Some(self.id_of(&element)),
            Err(e) => {
                log::warn!("create_element({tag}) failed: {e:?}");
                None
            }
        }
    }

    fn append_child(&self, parent: NodeId, child: NodeId) {
        if let (Some(parent), Some(child)) = (self.element(parent), self.element(child)) {
            let _ = parent.append_child(&child);
        }
    }

    fn remove(&self, node: NodeId) {
        if let Some(element) = self.element(node) {
            element.remove();
            evict_tree(&self.elements, &element);
        }
    }

    fn is_connected(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|e| e.is_connected())
    }

    fn clear_children(&self, node: NodeId) {
        if let Some(element) = self.element(node) {
            element.set_text_content(None);
        }
    }

    fn set_text(&self, node: NodeId, text: &str) {
        if let Some(element) = self.element(node) {
            element.set_text_content(Some(text));
        }
    }

    fn text(&self, node: NodeId) -> String {
        self.element(node).and_then(|e| e.text_content()).unwrap_or_default()
    }

    fn add_class(&self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.class_list().add_1(class);
        }
    }

    fn remove_class(&self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.class_list().remove_1(class);
        }
    }

    fn toggle_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .and_then(|e| e.class_list().toggle(class).ok())
            .unwrap_or(false)
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|e| e.class_list().contains(class))
    }

    fn classes(&self, node: NodeId) -> Vec<String> {
        self.element(node)
            .map(|e| e.class_name().split_whitespace().map(str::to_owned).collect())
            .unwrap_or_default()
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) {
        let Some(element) = self.html_element(node) else { return };
        let style = element.style();
        let _ = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
    }

    fn style(&self, node: NodeId, property: &str) -> String {
        self.html_element(node)
            .and_then(|e| e.style().get_property_value(property).ok())
            .unwrap_or_default()
    }

    fn query_class(&self, class: &str) -> Option<NodeId> {
        let element = self.document.query_selector(&Self::selector(class)).ok()??;
        Some(self.id_of(&element))
    }

    fn query_class_all(&self, class: &str) -> Vec<NodeId> {
        let Ok(list) = self.document.query_selector_all(&Self::selector(class)) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(|element| self.id_of(&element))
            .collect()
    }

    fn query_class_within(&self, root: NodeId, class: &str) -> Option<NodeId> {
        let element = self.element(root)?.query_selector(&Self::selector(class)).ok()??;
        Some(self.id_of(&element))
    }

    fn closest_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let element = self.element(node)?.closest(&Self::selector(class)).ok()??;
        Some(self.id_of(&element))
    }

    fn on_click(&self, target: ClickTarget, handler: ClickHandler) {
        let event_target: web_sys::EventTarget = match target {
            ClickTarget::Node(id) => match self.element(id) {
                Some(element) => element.into(),
                None => return,
            },
            ClickTarget::Document => self.document.clone().into(),
        };

        let arena = Rc::clone(&self.elements);
        let closure = Closure::<dyn Fn(web_sys::Event)>::new(move |event: web_sys::Event| {
            let Some(clicked) = event.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) else {
                return;
            };
            let (id, fresh) = register(&arena, &clicked);
            handler(id);
            if fresh {
                release(&arena, &clicked, id);
            }
        });
        let _ = event_target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
