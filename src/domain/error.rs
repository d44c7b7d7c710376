//! Error taxonomy of the shortening core.
//!
//! [`StoreError`] is what repositories report; [`ShortenError`] is what the
//! [`crate::application::services::LinkService`] reports to its callers.
//! The HTTP mapping lives in [`crate::error::AppError`].

/// Errors reported by a [`crate::domain::repositories::LinkRepository`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The short code is already taken. Callers regenerate and retry.
    #[error("short code already exists")]
    DuplicateCode,

    /// The original URL already has a record (lost a concurrent create race).
    #[error("original URL is already shortened")]
    DuplicateOriginal,

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Connectivity or I/O failure. The only transient variant.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Returns true for failures worth retrying with the same input.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Errors reported by the shortening service.
#[derive(Debug, thiserror::Error)]
pub enum ShortenError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("short code not found: {0}")]
    NotFound(String),

    /// Every generated code collided with an existing one.
    #[error("could not allocate a free short code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },

    #[error("random source failure: {0}")]
    RandomSource(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ShortenError {
    /// Returns true if the error is caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidUrl(_) | Self::NotFound(_))
    }
}
