//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::domain::error::StoreError;
use async_trait::async_trait;

/// Durable mapping keyed by short code and by original URL.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-process map
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link with a zero click counter.
    ///
    /// # Errors
    ///
    /// - [`StoreError::DuplicateCode`] if the short code is taken
    /// - [`StoreError::DuplicateOriginal`] if the original URL already has a record
    /// - [`StoreError::ConstraintViolation`] for malformed input
    /// - [`StoreError::Unavailable`] on connectivity failures
    async fn create(&self, new_link: NewLink) -> Result<Link, StoreError>;

    /// Finds a link by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    async fn find_by_short(&self, code: &str) -> Result<Option<Link>, StoreError>;

    /// Finds a link by its original URL.
    ///
    /// Used to check if a URL has already been shortened.
    async fn find_by_original(&self, original: &str) -> Result<Option<Link>, StoreError>;

    /// Atomically adds one click to the link with this code.
    ///
    /// Returns `Ok(false)` when no link matches; the counter is untouched.
    async fn increment_clicks(&self, code: &str) -> Result<bool, StoreError>;

    /// Checks that the backing store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
