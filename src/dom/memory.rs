//! In-memory [`Document`] arena.
//!
//! Used natively (tests, tooling) where there is no browser. The tree is a
//! flat `Vec` of nodes linked by parent/child ids; `<html>`, `<head>` and
//! `<body>` exist from construction. [`MemoryDocument::click`] dispatches a
//! bubbling click the way the browser would.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::collections::HashMap;

use super::document::{ClickHandler, ClickTarget, Document, NodeId};

#[derive(Debug)]
struct Node {
    tag: String,
    classes: Vec<String>,
    text: String,
    style: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    removed: bool,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            text: String::new(),
            style: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
            removed: false,
        }
    }
}

#[derive(Default)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn live(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).filter(|n| !n.removed)
    }

    fn live_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).filter(|n| !n.removed)
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes.get_mut(id.0).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(parent.0) {
            p.children.retain(|c| *c != id);
        }
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == candidate {
                return true;
            }
            match self.nodes.get(node.0).and_then(|n| n.parent) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    /// Pre-order descendants of `root`, excluding `root`.
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match self.live(root) {
            Some(n) => n.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(id) = stack.pop() {
            if let Some(node) = self.live(id) {
                out.push(id);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    fn text_of(&self, id: NodeId, out: &mut String) {
        if let Some(node) = self.live(id) {
            out.push_str(&node.text);
            for child in &node.children {
                self.text_of(*child, out);
            }
        }
    }
}

#[derive(Default)]
struct Listeners {
    nodes: HashMap<NodeId, Vec<ClickHandler>>,
    document: Vec<ClickHandler>,
}

pub struct MemoryDocument {
    tree: RefCell<Tree>,
    listeners: RefCell<Listeners>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// An empty page: `<html><head></head><body></body></html>`.
    #[must_use]
    pub fn new() -> Self {
        let mut tree = Tree::default();
        tree.nodes.push(Node::new("html"));
        tree.nodes.push(Node::new("head"));
        tree.nodes.push(Node::new("body"));
        let (root, head, body) = (NodeId(0), NodeId(1), NodeId(2));
        for child in [head, body] {
            tree.nodes[child.0].parent = Some(root);
            tree.nodes[root.0].children.push(child);
        }
        Self { tree: RefCell::new(tree), listeners: RefCell::default(), root, head, body }
    }

    /// Create `<tag class="class">`, append it to `parent`, and return it.
    pub fn append_new(&self, parent: NodeId, tag: &str, class: &str) -> NodeId {
        let id = {
            let mut tree = self.tree.borrow_mut();
            let mut node = Node::new(tag);
            node.classes = class.split_whitespace().map(str::to_owned).collect();
            tree.nodes.push(node);
            NodeId(tree.nodes.len() - 1)
        };
        self.append_child(parent, id);
        id
    }

    /// Lowercased tag name, or `None` for unknown/removed ids.
    pub fn tag(&self, node: NodeId) -> Option<String> {
        self.tree.borrow().live(node).map(|n| n.tag.clone())
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree.borrow().live(node).map(|n| n.children.clone()).unwrap_or_default()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.borrow().live(node).and_then(|n| n.parent)
    }

    /// Whether `node` was removed (tombstoned). Detached nodes are not removed.
    pub fn is_removed(&self, node: NodeId) -> bool {
        self.tree.borrow().nodes.get(node.0).is_some_and(|n| n.removed)
    }

    /// Click handlers still registered, node and document listeners together.
    pub fn listener_count(&self) -> usize {
        let listeners = self.listeners.borrow();
        listeners.nodes.values().map(Vec::len).sum::<usize>() + listeners.document.len()
    }

    /// Simulate a user click on `node`.
    ///
    /// Handlers on `node` and its ancestors run innermost first, then the
    /// document handlers if `node` is connected. Clicks on removed nodes are
    /// dropped.
    pub fn click(&self, node: NodeId) {
        let handlers: Vec<ClickHandler> = {
            let tree = self.tree.borrow();
            if tree.live(node).is_none() {
                return;
            }
            let listeners = self.listeners.borrow();
            let mut out = Vec::new();
            let mut cursor = Some(node);
            while let Some(id) = cursor {
                if let Some(list) = listeners.nodes.get(&id) {
                    out.extend(list.iter().cloned());
                }
                cursor = tree.nodes.get(id.0).and_then(|n| n.parent);
            }
            if tree.is_ancestor_or_self(self.root, node) {
                out.extend(listeners.document.iter().cloned());
            }
            out
        };
        for handler in handlers {
            handler(node);
        }
    }
}

impl Document for MemoryDocument {
    fn head(&self) -> Option<NodeId> {
        Some(self.head)
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        let mut tree = self.tree.borrow_mut();
        tree.nodes.push(Node::new(tag));
        Some(NodeId(tree.nodes.len() - 1))
    }

    fn append_child(&self, parent: NodeId, child: NodeId) {
        let mut tree = self.tree.borrow_mut();
        if tree.live(parent).is_none() || tree.live(child).is_none() {
            return;
        }
        // Appending an ancestor under its own descendant would form a cycle.
        if tree.is_ancestor_or_self(child, parent) {
            return;
        }
        tree.detach(child);
        tree.nodes[child.0].parent = Some(parent);
        tree.nodes[parent.0].children.push(child);
    }

    fn remove(&self, node: NodeId) {
        if node == self.root {
            return;
        }
        let mut tree = self.tree.borrow_mut();
        if tree.live(node).is_none() {
            return;
        }
        let mut doomed = tree.descendants(node);
        doomed.push(node);
        tree.detach(node);
        for id in &doomed {
            tree.nodes[id.0].removed = true;
        }
        drop(tree);
        let mut listeners = self.listeners.borrow_mut();
        for id in &doomed {
            listeners.nodes.remove(id);
        }
    }

    fn is_connected(&self, node: NodeId) -> bool {
        let tree = self.tree.borrow();
        tree.live(node).is_some() && tree.is_ancestor_or_self(self.root, node)
    }

    fn clear_children(&self, node: NodeId) {
        let mut tree = self.tree.borrow_mut();
        let Some(target) = tree.live_mut(node) else { return };
        target.text.clear();
        let children = std::mem::take(&mut target.children);
        for child in children {
            if let Some(c) = tree.nodes.get_mut(child.0) {
                c.parent = None;
            }
        }
    }

    fn set_text(&self, node: NodeId, text: &str) {
        self.clear_children(node);
        if let Some(target) = self.tree.borrow_mut().live_mut(node) {
            text.clone_into(&mut target.text);
        }
    }

    fn text(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.tree.borrow().text_of(node, &mut out);
        out
    }

    fn add_class(&self, node: NodeId, class: &str) {
        if let Some(target) = self.tree.borrow_mut().live_mut(node) {
            if !target.classes.iter().any(|c| c == class) {
                target.classes.push(class.to_owned());
            }
        }
    }

    fn remove_class(&self, node: NodeId, class: &str) {
        if let Some(target) = self.tree.borrow_mut().live_mut(node) {
            target.classes.retain(|c| c != class);
        }
    }

    fn toggle_class(&self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            self.has_class(node, class)
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.tree.borrow().live(node).is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn classes(&self, node: NodeId) -> Vec<String> {
        self.tree.borrow().live(node).map(|n| n.classes.clone()).unwrap_or_default()
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) {
        if let Some(target) = self.tree.borrow_mut().live_mut(node) {
            if value.is_empty() {
                target.style.remove(property);
            } else {
                target.style.insert(property.to_owned(), value.to_owned());
            }
        }
    }

    fn style(&self, node: NodeId, property: &str) -> String {
        self.tree
            .borrow()
            .live(node)
            .and_then(|n| n.style.get(property).cloned())
            .unwrap_or_default()
    }

    fn query_class(&self, class: &str) -> Option<NodeId> {
        self.query_class_within(self.root, class)
    }

    fn query_class_all(&self, class: &str) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        tree.descendants(self.root)
            .into_iter()
            .filter(|id| tree.nodes[id.0].classes.iter().any(|c| c == class))
            .collect()
    }

    fn query_class_within(&self, root: NodeId, class: &str) -> Option<NodeId> {
        let tree = self.tree.borrow();
        tree.descendants(root)
            .into_iter()
            .find(|id| tree.nodes[id.0].classes.iter().any(|c| c == class))
    }

    fn closest_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let tree = self.tree.borrow();
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            let current = tree.live(id)?;
            if current.classes.iter().any(|c| c == class) {
                return Some(id);
            }
            cursor = current.parent;
        }
        None
    }

    fn on_click(&self, target: ClickTarget, handler: ClickHandler) {
        let mut listeners = self.listeners.borrow_mut();
        match target {
            ClickTarget::Node(id) => listeners.nodes.entry(id).or_default().push(handler),
            ClickTarget::Document => listeners.document.push(handler),
        }
    }
}
