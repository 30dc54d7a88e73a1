//! Natural-key normalization for products (SKU) and accounts (email).
//!
//! Both collections are keyed by a human-entered string. Every lookup and
//! every write goes through these helpers so the stored form and the lookup
//! form can never disagree.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CoreError, CoreResult, FieldError};

/// Basic email shape accepted for special-price accounts.
///
/// Word characters are ASCII only (`[A-Za-z0-9_]`); accented and non-Latin
/// addresses are rejected.
pub const EMAIL_PATTERN_SRC: &str =
    r"^(?-u:\w)+([.-]?(?-u:\w)+)*@(?-u:\w)+([.-]?(?-u:\w)+)*(\.(?-u:\w){2,3})+$";

/// Compiled [`EMAIL_PATTERN_SRC`], shared with the request validators.
pub static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN_SRC).expect("valid regex"));

/// Message reported for emails that fail [`EMAIL_PATTERN`].
pub const INVALID_EMAIL_MESSAGE: &str = "Must be a valid email address";

/// Canonical SKU form: surrounding whitespace removed, uppercase.
///
/// ```
/// use pricebook_core::keys::normalize_sku;
///
/// assert_eq!(normalize_sku(" abc123 "), "ABC123");
/// ```
pub fn normalize_sku(sku: &str) -> String {
    sku.trim().to_uppercase()
}

/// Canonical email form: surrounding whitespace removed, lowercase.
///
/// ```
/// use pricebook_core::keys::normalize_email;
///
/// assert_eq!(normalize_email("A@B.com"), "a@b.com");
/// ```
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Whether an already-normalized email matches [`EMAIL_PATTERN`].
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Normalize an email taken from a path segment and reject malformed ones.
pub fn parse_email_key(raw: &str) -> CoreResult<String> {
    let email = normalize_email(raw);
    if !is_valid_email(&email) {
        return Err(CoreError::InvalidInput(vec![FieldError::new(
            "email",
            INVALID_EMAIL_MESSAGE,
        )]));
    }
    Ok(email)
}
