use super::*;
use crate::dom::memory::MemoryDocument;
use crate::util::scheduler::ManualScheduler;

fn server_rendered_page() -> (Rc<MemoryDocument>, Rc<ManualScheduler>, Page) {
    let doc = Rc::new(MemoryDocument::new());
    let body = doc.body().unwrap();
    let navbar = doc.append_new(body, "nav", "navbar");
    doc.append_new(navbar, "button", "nav-toggle");
    doc.append_new(navbar, "ul", "nav-links");
    let flashes = doc.append_new(body, "div", "flash-messages");
    let flash = doc.append_new(flashes, "div", "flash flash-info");
    doc.append_new(flash, "button", "flash-close");
    let scheduler = Rc::new(ManualScheduler::new());
    let page = Page::new(doc.clone(), scheduler.clone(), PageConfig::default());
    (doc, scheduler, page)
}

#[test]
fn init_wires_nav_flashes_and_animation() {
    let (doc, scheduler, page) = server_rendered_page();
    let handles = init(&page);

    assert!(handles.nav.is_some());
    assert_eq!(handles.existing_flashes, 1);
    assert!(doc.query_class("flash-animations").is_some());

    scheduler.advance_ms(5300);
    assert!(doc.query_class("flash").is_none());
}

#[test]
fn init_on_bare_page_is_harmless() {
    let doc = Rc::new(MemoryDocument::new());
    let page = Page::new(doc.clone(), Rc::new(ManualScheduler::new()), PageConfig::default());
    let handles = init(&page);
    assert!(handles.nav.is_none());
    assert_eq!(handles.existing_flashes, 0);
    assert!(doc.query_class("flash-messages").is_none(), "container is created lazily");
}

#[test]
fn page_flash_shares_configuration() {
    let config = PageConfig { flash_dismiss_ms: 1000, ..PageConfig::default() };
    let doc = Rc::new(MemoryDocument::new());
    let scheduler = Rc::new(ManualScheduler::new());
    let page = Page::new(doc.clone(), scheduler.clone(), config);

    let flash = page.flash().show("quick", crate::dom::flash::FlashKind::Info).unwrap();
    scheduler.advance_ms(1300);
    assert!(!doc.is_connected(flash));
}
