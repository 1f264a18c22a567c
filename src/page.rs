//! Page context and startup wiring.
//!
//! A [`Page`] bundles the document, the timer source and the configuration.
//! It is cheap to clone and is what every page behaviour takes instead of
//! reaching for browser globals.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use std::rc::{Rc, Weak};

use crate::config::PageConfig;
use crate::dom::document::Document;
use crate::dom::flash::FlashManager;
use crate::dom::nav::NavToggle;
use crate::util::scheduler::Scheduler;

#[derive(Clone)]
pub struct Page {
    pub doc: Rc<dyn Document>,
    pub scheduler: Rc<dyn Scheduler>,
    pub config: Rc<PageConfig>,
}

impl Page {
    pub fn new(doc: Rc<dyn Document>, scheduler: Rc<dyn Scheduler>, config: PageConfig) -> Self {
        Self { doc, scheduler, config: Rc::new(config) }
    }

    pub fn flash(&self) -> FlashManager {
        FlashManager::new(self.clone())
    }

    /// A handle that does not keep the document or scheduler alive.
    ///
    /// Listeners and timers registered on the document hold this instead of
    /// a `Page`, otherwise the document would own a strong path back to
    /// itself and never be freed.
    pub fn downgrade(&self) -> WeakPage {
        WeakPage {
            doc: Rc::downgrade(&self.doc),
            scheduler: Rc::downgrade(&self.scheduler),
            config: Rc::clone(&self.config),
        }
    }
}

#[derive(Clone)]
pub struct WeakPage {
    doc: Weak<dyn Document>,
    scheduler: Weak<dyn Scheduler>,
    config: Rc<PageConfig>,
}

impl WeakPage {
    /// The page again, or `None` once its document or scheduler is gone.
    pub fn upgrade(&self) -> Option<Page> {
        Some(Page { doc: self.doc.upgrade()?, scheduler: self.scheduler.upgrade()?, config: Rc::clone(&self.config) })
    }
}

/// Handles produced by [`init`].
pub struct PageHandles {
    pub nav: Option<NavToggle>,
    pub flash: FlashManager,
    /// Number of server-rendered flashes that were wired up.
    pub existing_flashes: usize,
}

/// Attach the page behaviours that run once the document is ready.
///
/// Installs the flash exit animation, the navigation toggle (when the page
/// has one) and dismissal for flashes the server already rendered.
pub fn init(page: &Page) -> PageHandles {
    let flash = page.flash();
    flash.install_animation_style();
    let nav = NavToggle::install(page);
    let existing_flashes = flash.attach_existing();
    log::debug!("page initialised: nav={} flashes={existing_flashes}", nav.is_some());
    PageHandles { nav, flash, existing_flashes }
}
