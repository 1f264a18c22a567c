use super::*;

// =============================================================
// validate_email
// =============================================================

#[test]
fn email_accepts_minimal_shape() {
    assert!(validate_email("a@b.co"));
    assert!(validate_email("user.name@domain.co.uk"));
    assert!(validate_email("firstname+lastname@company.org"));
}

#[test]
fn email_rejects_missing_tld() {
    assert!(!validate_email("a@b"));
    assert!(!validate_email("test@"));
}

#[test]
fn email_rejects_whitespace_and_empty() {
    assert!(!validate_email("a b@c.com"));
    assert!(!validate_email(""));
    assert!(!validate_email("test @example.com"));
}

#[test]
fn email_rejects_missing_local_part() {
    assert!(!validate_email("@example.com"));
    assert!(!validate_email("invalid"));
}

// =============================================================
// validate_password
// =============================================================

#[test]
fn password_accepts_mixed_case_with_digit() {
    assert!(validate_password("Abcdef12"));
}

#[test]
fn password_requires_each_character_class() {
    assert!(!validate_password("abcdef12"), "no uppercase");
    assert!(!validate_password("ABCDEF12"), "no lowercase");
    assert!(!validate_password("Abcdefgh"), "no digit");
}

#[test]
fn password_requires_minimum_length() {
    assert!(!validate_password("Ab1"));
    assert!(!validate_password("Abcde12"));
}

#[test]
fn password_does_not_require_symbols() {
    assert!(validate_password("Password1"));
    assert!(validate_password("Pass word 1!"));
}
