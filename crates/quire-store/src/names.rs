//! Document name validation.
//!
//! Valid document names:
//! - Must be non-empty and at most [`MAX_NAME_LEN`] bytes
//! - Must not contain `/`, `\` or control characters
//! - Must not start with `.`
//! - Must not contain `..`

use crate::error::{StoreError, StoreResult};

/// Longest accepted document name, in bytes.
pub const MAX_NAME_LEN: usize = 255;

/// Characters that are forbidden anywhere in a document name.
const FORBIDDEN_CHARS: &[char] = &['/', '\\'];

/// Validate a document name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use quire_store::names::validate_name;
///
/// assert!(validate_name("test.pl").is_ok());
/// assert!(validate_name("").is_err());
/// assert!(validate_name("../etc/passwd").is_err());
/// ```
pub fn validate_name(name: &str) -> StoreResult<()> {
    if name.is_empty() {
        return Err(invalid(name, "document name must not be empty".into()));
    }

    if name.len() > MAX_NAME_LEN {
        return Err(invalid(name, format!("longer than {MAX_NAME_LEN} bytes")));
    }

    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(invalid(name, format!("contains forbidden character: {ch:?}")));
        }
    }

    if name.chars().any(char::is_control) {
        return Err(invalid(name, "contains a control character".into()));
    }

    if name.starts_with('.') {
        return Err(invalid(name, "must not start with '.'".into()));
    }

    if name.contains("..") {
        return Err(invalid(name, "must not contain '..'".into()));
    }

    Ok(())
}

fn invalid(name: &str, reason: String) -> StoreError {
    StoreError::InvalidName {
        name: name.to_string(),
        reason,
    }
}
