//! Syntactic validation of URLs submitted for shortening.
//!
//! Only the shape is checked: the URL must be absolute, spelled with an
//! explicit `scheme://` authority and a non-empty host. No request is made to
//! the target.
//!
//! [`Url::parse`] strips surrounding whitespace and embedded tabs or newlines
//! while the submitted text is stored as-is, so such input is rejected here.

use url::Url;

/// Reasons a URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("URL contains control characters")]
    ControlCharacter,

    #[error("URL has leading or trailing whitespace")]
    SurroundingWhitespace,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL must start with 'scheme://'")]
    MissingAuthority,

    #[error("URL has no host")]
    MissingHost,
}

/// Checks that `input` is an absolute URL with a scheme and a host.
///
/// The input is not rewritten; the caller stores exactly what it submitted.
///
/// # Errors
///
/// - [`UrlValidationError::Empty`] for empty or whitespace-only input
/// - [`UrlValidationError::ControlCharacter`] for tabs, newlines and other control characters
/// - [`UrlValidationError::SurroundingWhitespace`] for input padded with spaces
/// - [`UrlValidationError::InvalidFormat`] for relative or unparsable URLs
/// - [`UrlValidationError::MissingAuthority`] for forms like `https:example.com`
/// - [`UrlValidationError::MissingHost`] for URLs such as `file:///` that carry no host
///
/// # Examples
///
/// ```ignore
/// assert!(validate_url("https://example.com/page").is_ok());
/// assert!(validate_url("not-a-url").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if input.chars().any(char::is_control) {
        return Err(UrlValidationError::ControlCharacter);
    }

    if input.trim() != input {
        return Err(UrlValidationError::SurroundingWhitespace);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match input.split_once("://") {
        Some((scheme, _)) if scheme.eq_ignore_ascii_case(url.scheme()) => {}
        _ => return Err(UrlValidationError::MissingAuthority),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}
