//! Click event model for asynchronous click counting.

use chrono::{DateTime, Utc};

/// One resolved redirect waiting to be counted.
///
/// Sent from [`crate::application::services::LinkService::redirect`] to the
/// background worker through a bounded channel, so the redirect never waits
/// on the counter update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub code: String,
    pub clicked_at: DateTime<Utc>,
}

impl ClickEvent {
    /// Creates a click event for `code` stamped with the current time.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            clicked_at: Utc::now(),
        }
    }
}
