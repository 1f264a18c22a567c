//! Flash notifications: transient banners that dismiss themselves.
//!
//! DESIGN
//! ======
//! Every flash, whether rendered by the server or created by
//! [`FlashManager::show`], gets the same two exits: an auto-dismiss timer
//! and its close button. Both call [`FlashManager::dismiss`], which plays
//! the exit animation and removes the element once it finishes. The timer
//! is never cancelled, so dismissal has to tolerate running twice; node
//! removal is idempotent and a flash already on its way out is skipped.

#[cfg(test)]
#[path = "flash_test.rs"]
mod flash_test;

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use super::document::{ClickTarget, NodeId, create_with_class};
use crate::page::{Page, WeakPage};

const ANIMATION_STYLE_CLASS: &str = "flash-animations";
/// Marks a flash whose exit animation has started.
const DISMISSING_CLASS: &str = "is-dismissing";

const SLIDE_OUT_KEYFRAMES: &str = "
    @keyframes slideOut {
        from {
            transform: translateX(0);
            opacity: 1;
        }
        to {
            transform: translateX(100%);
            opacity: 0;
        }
    }
";

/// Severity of a flash, rendered as the `flash-<kind>` class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FlashKind {
    #[default]
    Success,
    Error,
    Warning,
    Info,
    /// Any other category the server uses.
    Other(String),
}

impl FlashKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Other(name) => name,
        }
    }

    /// Exact names only; anything else is kept verbatim so the rendered
    /// `flash-<kind>` class matches what the caller asked for.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "success" => Self::Success,
            "error" => Self::Error,
            "warning" => Self::Warning,
            "info" => Self::Info,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for FlashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for FlashKind {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

#[derive(Clone)]
pub struct FlashManager {
    page: Page,
}

impl FlashManager {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// Show `message` as a new flash of the given kind.
    ///
    /// The message is inserted as text, never as markup. Returns the new
    /// element, or `None` if the document has no body to attach to.
    pub fn show(&self, message: &str, kind: FlashKind) -> Option<NodeId> {
        let doc = &self.page.doc;
        let classes = &self.page.config.classes;
        let container = self.container()?;

        let flash = create_with_class(&**doc, "div", &classes.flash)?;
        doc.add_class(flash, &format!("{}-{kind}", classes.flash));

        let text = doc.create_element("span")?;
        doc.set_text(text, message);
        doc.append_child(flash, text);

        let close = create_with_class(&**doc, "button", &classes.flash_close)?;
        doc.set_text(close, "\u{d7}");
        doc.append_child(flash, close);

        doc.append_child(container, flash);
        self.arm(flash);
        log::debug!("flash shown: kind={kind}");
        Some(flash)
    }

    /// Wire dismissal on every flash already in the document.
    pub fn attach_existing(&self) -> usize {
        let flashes = self.page.doc.query_class_all(&self.page.config.classes.flash);
        for flash in &flashes {
            self.arm(*flash);
        }
        flashes.len()
    }

    /// Start the exit animation and remove `flash` when it ends.
    ///
    /// Safe to call any number of times, including after removal.
    pub fn dismiss(&self, flash: NodeId) {
        let doc = &self.page.doc;
        if !doc.is_connected(flash) {
            return;
        }
        if doc.has_class(flash, DISMISSING_CLASS) {
            return;
        }
        doc.add_class(flash, DISMISSING_CLASS);
        doc.set_style(flash, "animation", &self.page.config.flash_exit_animation());

        let remover = Rc::downgrade(doc);
        self.page.scheduler.set_timeout(
            Duration::from_millis(self.page.config.flash_transition_ms),
            Box::new(move || {
                if let Some(doc) = remover.upgrade() {
                    doc.remove(flash);
                }
            }),
        );
    }

    /// Kind recovered from the element's `flash-<kind>` class.
    pub fn kind_of(&self, flash: NodeId) -> Option<FlashKind> {
        let prefix = format!("{}-", self.page.config.classes.flash);
        self.page
            .doc
            .classes(flash)
            .iter()
            .find_map(|c| c.strip_prefix(&prefix).map(FlashKind::parse))
    }

    /// Add the `slideOut` keyframes to `<head>` once.
    pub fn install_animation_style(&self) -> Option<NodeId> {
        let doc = &self.page.doc;
        if let Some(existing) = doc.query_class(ANIMATION_STYLE_CLASS) {
            return Some(existing);
        }
        let head = doc.head()?;
        let style = create_with_class(&**doc, "style", ANIMATION_STYLE_CLASS)?;
        doc.set_text(style, SLIDE_OUT_KEYFRAMES);
        doc.append_child(head, style);
        Some(style)
    }

    /// The shared `.flash-messages` container, created on first use.
    fn container(&self) -> Option<NodeId> {
        let doc = &self.page.doc;
        let class = &self.page.config.classes.flash_container;
        if let Some(existing) = doc.query_class(class) {
            return Some(existing);
        }
        let body = doc.body()?;
        let container = create_with_class(&**doc, "div", class)?;
        doc.append_child(body, container);
        Some(container)
    }

    fn arm(&self, flash: NodeId) {
        let auto = self.page.downgrade();
        self.page.scheduler.set_timeout(
            Duration::from_millis(self.page.config.flash_dismiss_ms),
            Box::new(move || dismiss_weak(&auto, flash)),
        );

        if let Some(close) = self.page.doc.query_class_within(flash, &self.page.config.classes.flash_close) {
            let manual = self.page.downgrade();
            self.page
                .doc
                .on_click(ClickTarget::Node(close), Rc::new(move |_: NodeId| dismiss_weak(&manual, flash)));
        }
    }
}

fn dismiss_weak(page: &WeakPage, flash: NodeId) {
    if let Some(page) = page.upgrade() {
        FlashManager::new(page).dismiss(flash);
    }
}

/// Show a flash on `page`. See [`FlashManager::show`].
pub fn show_flash(page: &Page, message: &str, kind: FlashKind) -> Option<NodeId> {
    page.flash().show(message, kind)
}
