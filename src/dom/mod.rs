//! Document-facing page behaviour.
//!
//! SYSTEM CONTEXT
//! ==============
//! `document` defines the capability every component talks to; `memory`
//! and `browser` implement it. The remaining modules are the page
//! behaviours themselves (navigation menu, flash messages, field errors,
//! placeholders), each taking a [`crate::page::Page`] rather than reaching
//! for globals.

pub mod document;
pub mod field_error;
pub mod flash;
pub mod memory;
pub mod nav;
pub mod placeholder;

#[cfg(feature = "hydrate")]
pub mod browser;
