//! The document capability.
//!
//! DESIGN
//! ======
//! Elements are addressed by [`NodeId`] handles into an arena owned by the
//! implementation. Ids stay valid after removal: a removed node is
//! tombstoned, and every later operation on it is a silent no-op. That is
//! what lets a flash be dismissed by both its timer and its close button
//! without either path failing.
//!
//! Selectors are single class names; that is all the page markup needs.

use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Where a click listener is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    /// Fires for clicks on this element or anything inside it.
    Node(NodeId),
    /// Fires for every click that reaches the document.
    Document,
}

/// Click handler; receives the element that was actually clicked.
pub type ClickHandler = Rc<dyn Fn(NodeId)>;

pub trait Document {
    fn head(&self) -> Option<NodeId>;
    fn body(&self) -> Option<NodeId>;

    /// Create a detached element.
    fn create_element(&self, tag: &str) -> Option<NodeId>;
    fn append_child(&self, parent: NodeId, child: NodeId);
    /// Detach and tombstone `node` with its whole subtree. Idempotent.
    fn remove(&self, node: NodeId);
    /// Whether `node` is attached to the document tree and not removed.
    fn is_connected(&self, node: NodeId) -> bool;
    /// Detach every child of `node`.
    fn clear_children(&self, node: NodeId);

    /// Replace the contents of `node` with a single text run.
    fn set_text(&self, node: NodeId, text: &str);
    /// Concatenated text of `node` and its descendants.
    fn text(&self, node: NodeId) -> String;

    fn add_class(&self, node: NodeId, class: &str);
    fn remove_class(&self, node: NodeId, class: &str);
    /// Flip `class`; returns whether it is now present.
    fn toggle_class(&self, node: NodeId, class: &str) -> bool;
    fn has_class(&self, node: NodeId, class: &str) -> bool;
    fn classes(&self, node: NodeId) -> Vec<String>;

    /// Set an inline style property. An empty value clears it.
    fn set_style(&self, node: NodeId, property: &str, value: &str);
    /// Inline style value, empty when unset.
    fn style(&self, node: NodeId, property: &str) -> String;

    /// First connected element carrying `class`, in document order.
    fn query_class(&self, class: &str) -> Option<NodeId>;
    fn query_class_all(&self, class: &str) -> Vec<NodeId>;
    /// First descendant of `root` (excluding `root`) carrying `class`.
    fn query_class_within(&self, root: NodeId, class: &str) -> Option<NodeId>;
    /// `node` itself or its nearest ancestor carrying `class`.
    fn closest_class(&self, node: NodeId, class: &str) -> Option<NodeId>;

    fn on_click(&self, target: ClickTarget, handler: ClickHandler);
}

/// Create a `tag` element with `class` already applied.
pub fn create_with_class(doc: &dyn Document, tag: &str, class: &str) -> Option<NodeId> {
    let node = doc.create_element(tag)?;
    for name in class.split_whitespace() {
        doc.add_class(node, name);
    }
    Some(node)
}
