//! Form input shape checks.
//!
//! These are predicates only; presenting the result is left to
//! [`crate::dom::field_error`].

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::sync::LazyLock;

use regex::Regex;

pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Return `true` when `email` looks like `local@domain.tld`.
///
/// This is a shape check, not RFC 5322 validation.
pub fn validate_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Return `true` when `password` has at least 8 characters including an
/// ASCII uppercase letter, an ASCII lowercase letter and a digit.
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
}
