//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Request body for `POST /urls/shorten` and `PUT /urls/{id}`.
///
/// The URL is checked for syntax here; the link service additionally
/// restricts it to HTTP(S).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LinkRequest {
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,
}

/// Response for a successful shorten call.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
}

/// A link as returned to its owner.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: i64,
    pub original_url: String,
    pub code: String,
    pub short_url: String,
    pub owner_id: Option<i64>,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn from_link(link: Link, short_url: String) -> Self {
        Self {
            id: link.id,
            original_url: link.original_url,
            code: link.code,
            short_url,
            owner_id: link.owner_id,
            click_count: link.click_count,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}
