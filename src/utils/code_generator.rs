//! Short code generation.
//!
//! Codes are drawn from the operating system RNG, encoded as URL-safe base64
//! and truncated to [`CODE_LENGTH`] characters.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Number of characters in a generated short code.
pub const CODE_LENGTH: usize = 6;

/// Random bytes drawn per code. Six bytes encode to eight characters, which
/// leaves enough material for the truncation.
const CODE_LENGTH_BYTES: usize = 6;

/// Generates a cryptographically secure random short code.
///
/// The alphabet is `A-Z a-z 0-9 - _`, so codes are safe to embed in a path
/// segment without escaping.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random number generator fails.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code()?;
/// assert_eq!(code.len(), 6);
/// ```
pub fn generate_code() -> Result<String, AppError> {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate random bytes",
            json!({ "reason": e.to_string() }),
        )
    })?;

    let mut code = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer);
    code.truncate(CODE_LENGTH);

    Ok(code)
}

/// Returns true if `code` could have been produced by [`generate_code`].
///
/// Used to reject obviously bogus redirect lookups without a database round trip.
pub fn is_well_formed_code(code: &str) -> bool {
    code.len() == CODE_LENGTH
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
