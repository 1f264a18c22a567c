use std::rc::Rc;

use super::*;
use crate::config::PageConfig;
use crate::dom::document::Document;
use crate::dom::memory::MemoryDocument;
use crate::util::scheduler::ManualScheduler;

struct Fixture {
    doc: Rc<MemoryDocument>,
    page: Page,
    toggle: NodeId,
    menu: NodeId,
    link: NodeId,
    outside: NodeId,
}

fn fixture() -> Fixture {
    let doc = Rc::new(MemoryDocument::new());
    let body = doc.body().unwrap();
    let navbar = doc.append_new(body, "nav", "navbar");
    let toggle = doc.append_new(navbar, "button", "nav-toggle");
    let menu = doc.append_new(navbar, "ul", "nav-links");
    let link = doc.append_new(menu, "a", "");
    let outside = doc.append_new(body, "main", "content");
    let page = Page::new(doc.clone(), Rc::new(ManualScheduler::new()), PageConfig::default());
    Fixture { doc, page, toggle, menu, link, outside }
}

#[test]
fn install_finds_toggle_and_menu() {
    let f = fixture();
    let nav = NavToggle::install(&f.page).unwrap();
    assert_eq!(nav.toggle_button(), f.toggle);
    assert_eq!(nav.menu(), f.menu);
    assert!(!nav.is_open());
}

#[test]
fn install_without_toggle_is_silent_noop() {
    let doc = Rc::new(MemoryDocument::new());
    let body = doc.body().unwrap();
    let menu = doc.append_new(body, "ul", "nav-links");
    let page = Page::new(doc.clone(), Rc::new(ManualScheduler::new()), PageConfig::default());
    assert!(NavToggle::install(&page).is_none());
    doc.click(body);
    assert!(!doc.has_class(menu, "active"));
}

#[test]
fn install_without_menu_is_silent_noop() {
    let doc = Rc::new(MemoryDocument::new());
    doc.append_new(doc.body().unwrap(), "button", "nav-toggle");
    let page = Page::new(doc, Rc::new(ManualScheduler::new()), PageConfig::default());
    assert!(NavToggle::install(&page).is_none());
}

#[test]
fn clicking_toggle_flips_menu() {
    let f = fixture();
    NavToggle::install(&f.page).unwrap();
    f.doc.click(f.toggle);
    assert!(f.doc.has_class(f.menu, "active"));
    f.doc.click(f.toggle);
    assert!(!f.doc.has_class(f.menu, "active"));
}

#[test]
fn clicking_inside_navbar_keeps_menu_open() {
    let f = fixture();
    let nav = NavToggle::install(&f.page).unwrap();
    f.doc.click(f.toggle);
    f.doc.click(f.link);
    assert!(nav.is_open());
}

#[test]
fn clicking_outside_closes_menu_idempotently() {
    let f = fixture();
    let nav = NavToggle::install(&f.page).unwrap();
    f.doc.click(f.toggle);
    f.doc.click(f.outside);
    assert!(!nav.is_open());
    f.doc.click(f.outside);
    assert!(!nav.is_open());
}

#[test]
fn toggle_and_close_are_callable_directly() {
    let f = fixture();
    let nav = NavToggle::install(&f.page).unwrap();
    assert!(nav.toggle());
    nav.close();
    nav.close();
    assert!(!nav.is_open());
}

#[test]
fn handlers_do_not_keep_document_alive() {
    let Fixture { doc, page, toggle, .. } = fixture();
    let nav = NavToggle::install(&page).unwrap();
    drop(nav);
    drop(page);
    assert_eq!(Rc::strong_count(&doc), 1);
    doc.click(toggle);
    assert_eq!(doc.listener_count(), 2);
}
