//! Mobile navigation menu toggle.
//!
//! The toggle button flips the `active` class on the link list; any click
//! outside the navbar closes the menu again. The open/closed state lives
//! only in that class.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use std::rc::Rc;

use super::document::{ClickTarget, NodeId};
use crate::page::Page;

#[derive(Clone)]
pub struct NavToggle {
    page: Page,
    toggle: NodeId,
    menu: NodeId,
}

impl NavToggle {
    /// Wire the toggle and outside-click handlers.
    ///
    /// Returns `None`, doing nothing, when the page has no toggle button or
    /// no link list.
    pub fn install(page: &Page) -> Option<Self> {
        let classes = &page.config.classes;
        let toggle = page.doc.query_class(&classes.nav_toggle)?;
        let menu = page.doc.query_class(&classes.nav_links)?;
        let nav = Self { page: page.clone(), toggle, menu };

        let weak = page.downgrade();
        page.doc.on_click(
            ClickTarget::Node(toggle),
            Rc::new(move |_: NodeId| {
                if let Some(page) = weak.upgrade() {
                    Self { page, toggle, menu }.toggle();
                }
            }),
        );

        let weak = page.downgrade();
        page.doc.on_click(
            ClickTarget::Document,
            Rc::new(move |clicked: NodeId| {
                let Some(page) = weak.upgrade() else { return };
                if page.doc.closest_class(clicked, &page.config.classes.navbar).is_none() {
                    Self { page, toggle, menu }.close();
                }
            }),
        );

        log::debug!("navigation toggle installed");
        Some(nav)
    }

    /// Flip the menu open/closed; returns whether it is now open.
    pub fn toggle(&self) -> bool {
        self.page.doc.toggle_class(self.menu, &self.page.config.classes.active)
    }

    pub fn close(&self) {
        self.page.doc.remove_class(self.menu, &self.page.config.classes.active);
    }

    pub fn is_open(&self) -> bool {
        self.page.doc.has_class(self.menu, &self.page.config.classes.active)
    }

    pub fn toggle_button(&self) -> NodeId {
        self.toggle
    }

    pub fn menu(&self) -> NodeId {
        self.menu
    }
}
