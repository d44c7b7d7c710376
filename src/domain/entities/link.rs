//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL link with its click counter.
///
/// `id` and `short` always hold the same code; the code is the primary key and
/// `short` is kept as a separate column for schema flexibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: String,
    pub original: String,
    pub short: String,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: String,
        original: String,
        short: String,
        created_at: DateTime<Utc>,
        clicks: i64,
    ) -> Self {
        Self {
            id,
            original,
            short,
            created_at,
            clicks,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub original: String,
    pub created_at: DateTime<Utc>,
}

impl NewLink {
    /// Prepares a record for `code` → `original`, stamped with the current time.
    pub fn new(code: impl Into<String>, original: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            original: original.into(),
            created_at: Utc::now(),
        }
    }

    /// Materialises the stored record with a zeroed click counter.
    pub fn into_link(self) -> Link {
        Link::new(
            self.code.clone(),
            self.original,
            self.code,
            self.created_at,
            0,
        )
    }
}
