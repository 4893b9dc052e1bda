//! Validation of destination URLs.
//!
//! Links store the destination exactly as submitted. The only requirement is
//! that it is an absolute HTTP(S) URL a browser can follow.

use url::Url;

/// Upper bound on stored destination length.
pub const MAX_URL_LENGTH: usize = 2048;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL exceeds {MAX_URL_LENGTH} characters")]
    TooLong,

    #[error("URL contains control characters")]
    ControlCharacter,
}

/// Checks that `input` is an absolute `http` or `https` URL with a host.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for malformed or relative URLs.
/// Returns [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes
/// such as `javascript:`, `data:` or `ftp:`.
/// Returns [`UrlValidationError::TooLong`] past [`MAX_URL_LENGTH`].
/// Returns [`UrlValidationError::ControlCharacter`] for tabs, newlines and
/// other ASCII control characters, which the parser would silently drop but
/// which cannot be sent back in a `Location` header.
pub fn validate_target_url(input: &str) -> Result<(), UrlValidationError> {
    if input.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    if input.chars().any(|c| c.is_ascii_control()) {
        return Err(UrlValidationError::ControlCharacter);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::InvalidFormat(
            "URL has no host".to_string(),
        ));
    }

    Ok(())
}
