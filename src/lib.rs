//! # mulespace-ui
//!
//! Page helpers for the MuleSpace event site: navigation menu toggle,
//! flash notifications, a JSON request helper, form validation, date/time
//! formatting, loading/error placeholders and debounce.
//!
//! Behaviour is written against two injected capabilities, a
//! [`dom::document::Document`] and a [`util::scheduler::Scheduler`], bundled
//! in a [`page::Page`]. Natively those are the in-memory arena and manual
//! clock; with the `hydrate` feature the crate targets the live browser
//! document and exports the same surface to page scripts.

pub mod config;
pub mod dom;
pub mod net;
pub mod page;
pub mod util;

#[cfg(feature = "hydrate")]
pub mod bindings;

pub use config::PageConfig;
pub use dom::field_error::{clear_field_error, show_field_error};
pub use dom::flash::{FlashKind, FlashManager, show_flash};
pub use dom::placeholder::{show_error, show_loading};
pub use net::api::{ApiError, RequestOptions, api_request};
pub use page::Page;
pub use util::debounce::{Debounced, debounce};
pub use util::format::{format_date, format_date_time, format_time};
pub use util::validation::{validate_email, validate_password};
