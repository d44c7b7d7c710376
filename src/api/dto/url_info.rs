//! DTO for the link info endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Link;

/// Stored link record as exposed over the API.
#[derive(Debug, Serialize)]
pub struct UrlInfoResponse {
    pub id: String,
    pub original_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
}

impl From<Link> for UrlInfoResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            original_url: link.original,
            short_url: link.short,
            created_at: link.created_at,
            clicks: link.clicks,
        }
    }
}
