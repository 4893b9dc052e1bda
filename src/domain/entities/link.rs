//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with its owner and click counter.
///
/// `owner_id` is `None` for anonymous links and for links whose owner was
/// removed. `deleted_at` is set on soft deletion; the row is never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub original_url: String,
    pub code: String,
    pub owner_id: Option<i64>,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Link {
    /// Returns true if the link has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns true if the link is visible to redirects and its owner.
    pub fn is_active(&self) -> bool {
        !self.is_deleted()
    }

    /// Returns true if `user_id` owns this link.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == Some(user_id)
    }
}

/// Input data for creating a new link.
///
/// Click count and timestamps are assigned by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub original_url: String,
    pub owner_id: Option<i64>,
}
