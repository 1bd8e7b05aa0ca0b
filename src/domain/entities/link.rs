//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A short code bound to its destination URL, plus usage statistics.
///
/// `code` and `original_url` never change after creation. `clicks` and
/// `last_clicked_at` are only touched by a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub last_clicked_at: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        code: String,
        original_url: String,
        clicks: i64,
        created_at: DateTime<Utc>,
        last_clicked_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            code,
            original_url,
            clicks,
            created_at,
            last_clicked_at,
        }
    }
}

/// Input data for creating a new link.
///
/// The store assigns `id` and `created_at`; `clicks` starts at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub original_url: String,
}
