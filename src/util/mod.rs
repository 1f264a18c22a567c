//! Browser-independent helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure predicates and formatters, plus the timer capability (`scheduler`)
//! and the rate limiter built on it (`debounce`). Nothing here touches the
//! document, so every module is testable natively.

pub mod debounce;
pub mod format;
pub mod scheduler;
pub mod validation;
