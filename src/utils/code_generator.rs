//! Short code generation and validation utilities.

use std::sync::LazyLock;

use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;

use crate::error::ValidationError;

/// Number of characters in a generated short code.
pub const GENERATED_CODE_LENGTH: usize = 6;

/// Accepted shape for caller-supplied custom codes.
static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]{3,20}$").unwrap());

/// Draws a random short code.
///
/// Each of the 6 characters is sampled uniformly from the 62-symbol
/// alphanumeric alphabet, giving ~5.6e10 possible codes. Collision handling
/// is the caller's concern; see `AliasService`.
///
/// # Examples
///
/// ```
/// let code = alias_registry::utils::code_generator::generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_CODE_LENGTH)
        .map(char::from)
        .collect()
}

/// Validates a caller-supplied custom short code.
///
/// # Rules
///
/// - Length: 3-20 characters
/// - Allowed characters: letters, digits, hyphens
///
/// # Errors
///
/// Returns [`ValidationError::InvalidCodeFormat`] if the shape is violated.
pub fn validate_custom_code(code: &str) -> Result<(), ValidationError> {
    if CODE_REGEX.is_match(code) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCodeFormat)
    }
}
