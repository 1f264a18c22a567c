//! JavaScript export surface for page scripts (hydrate only).
//!
//! `start` runs when the module loads: it installs logging, builds the
//! [`Page`] over the live document and runs [`crate::page::init`]. The
//! remaining exports mirror the crate root so inline page scripts can call
//! `showFlash`, `apiRequest`, `debounce` and friends.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::config::PageConfig;
use crate::dom::browser::BrowserDocument;
use crate::dom::flash::FlashKind;
use crate::net::api::{Method, RequestOptions};
use crate::net::transport::GlooTransport;
use crate::page::{Page, PageHandles};
use crate::util::scheduler::BrowserScheduler;

struct BrowserRuntime {
    page: Page,
    dom: Rc<BrowserDocument>,
    _handles: PageHandles,
}

thread_local! {
    static RUNTIME: RefCell<Option<Rc<BrowserRuntime>>> = const { RefCell::new(None) };
}

fn runtime() -> Option<Rc<BrowserRuntime>> {
    RUNTIME.with(|slot| slot.borrow().clone())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("no document available; page helpers disabled");
        return;
    };
    let raw_config = document.body().and_then(|b| b.get_attribute("data-page-config"));
    let config = PageConfig::from_json_or_default(raw_config.as_deref());
    let dom = Rc::new(BrowserDocument::new(document));
    let page = Page::new(dom.clone(), Rc::new(BrowserScheduler::new()), config);
    let handles = crate::page::init(&page);
    RUNTIME.with(|slot| *slot.borrow_mut() = Some(Rc::new(BrowserRuntime { page, dom, _handles: handles })));
}

// =============================================================================
// PURE HELPERS
// =============================================================================

#[wasm_bindgen(js_name = validateEmail)]
pub fn validate_email(email: &str) -> bool {
    crate::util::validation::validate_email(email)
}

#[wasm_bindgen(js_name = validatePassword)]
pub fn validate_password(password: &str) -> bool {
    crate::util::validation::validate_password(password)
}

#[wasm_bindgen(js_name = formatDate)]
pub fn format_date(date: &str) -> String {
    crate::util::format::format_date(date)
}

#[wasm_bindgen(js_name = formatTime)]
pub fn format_time(time: &str) -> String {
    crate::util::format::format_time(time)
}

#[wasm_bindgen(js_name = formatDateTime)]
pub fn format_date_time(date: &str, time: &str) -> String {
    crate::util::format::format_date_time(date, time)
}

// =============================================================================
// DOCUMENT HELPERS
// =============================================================================

#[wasm_bindgen(js_name = showFlash)]
pub fn show_flash(message: &str, kind: Option<String>) {
    let Some(rt) = runtime() else { return };
    let kind = kind.as_deref().map(FlashKind::parse).unwrap_or_default();
    crate::dom::flash::show_flash(&rt.page, message, kind);
}

#[wasm_bindgen(js_name = showFieldError)]
pub fn show_field_error(input: &web_sys::Element, message: &str) {
    let Some(rt) = runtime() else { return };
    crate::dom::field_error::show_field_error(&rt.page, rt.dom.id_of(input), message);
}

#[wasm_bindgen(js_name = clearFieldError)]
pub fn clear_field_error(input: &web_sys::Element) {
    let Some(rt) = runtime() else { return };
    crate::dom::field_error::clear_field_error(&rt.page, rt.dom.id_of(input));
}

#[wasm_bindgen(js_name = showLoading)]
pub fn show_loading(container: &web_sys::Element, text: Option<String>) {
    let Some(rt) = runtime() else { return };
    crate::dom::placeholder::show_loading(&rt.page, rt.dom.id_of(container), text.as_deref());
}

#[wasm_bindgen(js_name = showError)]
pub fn show_error(container: &web_sys::Element, message: &str) {
    let Some(rt) = runtime() else { return };
    crate::dom::placeholder::show_error(&rt.page, rt.dom.id_of(container), message);
}

// =============================================================================
// HTTP
// =============================================================================

/// `fetch`-style options as page scripts pass them.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JsRequestOptions {
    method: Option<String>,
    headers: BTreeMap<String, String>,
    /// Already-serialised JSON, as `fetch` expects.
    body: Option<String>,
}

fn parse_method(raw: Option<&str>) -> Result<Method, String> {
    match raw.map(str::to_ascii_uppercase).as_deref() {
        None | Some("GET") => Ok(Method::Get),
        Some("POST") => Ok(Method::Post),
        Some("PUT") => Ok(Method::Put),
        Some("PATCH") => Ok(Method::Patch),
        Some("DELETE") => Ok(Method::Delete),
        Some(other) => Err(format!("unsupported method: {other}")),
    }
}

fn request_options(options: &JsValue) -> Result<RequestOptions, String> {
    if options.is_undefined() || options.is_null() {
        return Ok(RequestOptions::default());
    }
    let raw: String = js_sys::JSON::stringify(options)
        .map_err(|e| format!("{e:?}"))?
        .into();
    let parsed: JsRequestOptions = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
    let body = parsed
        .body
        .map(|b| serde_json::from_str::<Value>(&b))
        .transpose()
        .map_err(|e| format!("request body is not JSON: {e}"))?;
    Ok(RequestOptions {
        method: parse_method(parsed.method.as_deref())?,
        headers: parsed.headers.into_iter().collect(),
        body,
    })
}

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}

/// Resolves to the parsed JSON body; rejects with an `Error` whose message
/// is the server's `error` field for failed responses.
#[wasm_bindgen(js_name = apiRequest)]
pub async fn api_request(url: String, options: JsValue) -> Result<JsValue, JsValue> {
    let options = request_options(&options).map_err(|e| js_error(&e))?;
    let data = crate::net::api::api_request(&GlooTransport, &url, options)
        .await
        .map_err(|e| js_error(&e.to_string()))?;
    js_sys::JSON::parse(&data.to_string())
}

// =============================================================================
// DEBOUNCE
// =============================================================================

/// Wrap `func` so bursts of calls collapse into one trailing call with the
/// last argument. The returned function takes a single argument.
#[wasm_bindgen]
pub fn debounce(func: js_sys::Function, wait: u32) -> js_sys::Function {
    let scheduler: Rc<dyn crate::util::scheduler::Scheduler> = match runtime() {
        Some(rt) => Rc::clone(&rt.page.scheduler),
        None => Rc::new(BrowserScheduler::new()),
    };
    let debounced = crate::util::debounce::debounce(scheduler, Duration::from_millis(u64::from(wait)), move |arg: JsValue| {
        if let Err(e) = func.call1(&JsValue::NULL, &arg) {
            log::error!("debounced callback threw: {e:?}");
        }
    });
    Closure::<dyn Fn(JsValue)>::new(move |arg: JsValue| debounced.call(arg))
        .into_js_value()
        .unchecked_into()
}
