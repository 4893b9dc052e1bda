//! Link creation, ownership-scoped management and redirect resolution.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_well_formed_code};
use crate::utils::url_validator::validate_target_url;
use chrono::Utc;
use serde_json::json;

/// Default number of code generation attempts before giving up.
pub const DEFAULT_CODE_ATTEMPTS: usize = 5;

/// Service for creating and managing shortened links.
///
/// Every mutation goes through an owner-scoped lookup, so a link owned by
/// someone else is indistinguishable from a missing one.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    base_url: String,
    max_attempts: usize,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    ///
    /// # Arguments
    ///
    /// - `link_repository` - storage for link records
    /// - `base_url` - prefix for returned short URLs (e.g. `http://localhost:3077/urls`)
    /// - `max_attempts` - code generation attempts per shorten call; `1` fails on
    ///   the first collision
    pub fn new(link_repository: Arc<L>, base_url: impl Into<String>, max_attempts: usize) -> Self {
        Self {
            link_repository,
            base_url: base_url.into(),
            max_attempts: max_attempts.max(1),
        }
    }

    /// Shortens `original_url`, optionally on behalf of `owner_id`.
    ///
    /// Returns the fully-qualified short URL.
    ///
    /// # Code Generation
    ///
    /// A fresh random code is drawn per attempt. An attempt collides if an
    /// active link already uses the code, either on the pre-check or when the
    /// storage layer rejects the insert.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not an absolute HTTP(S) URL.
    /// Returns [`AppError::CodeCollision`] once every attempt collided.
    /// Returns [`AppError::Internal`] on database or RNG errors.
    pub async fn shorten(
        &self,
        original_url: &str,
        owner_id: Option<i64>,
    ) -> Result<String, AppError> {
        validate_target_url(original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        for attempt in 1..=self.max_attempts {
            let code = generate_code()?;

            if self
                .link_repository
                .find_active_by_code(&code)
                .await?
                .is_some()
            {
                tracing::warn!(attempt, code = %code, "Generated short code is already active");
                metrics::counter!("code_collisions_total").increment(1);
                continue;
            }

            let new_link = NewLink {
                code,
                original_url: original_url.to_string(),
                owner_id,
            };

            match self.link_repository.insert(new_link).await {
                Ok(link) => {
                    tracing::info!(
                        link_id = link.id,
                        code = %link.code,
                        owner_id = ?link.owner_id,
                        "Short link created"
                    );
                    metrics::counter!("links_created_total").increment(1);
                    return Ok(self.short_url(&link.code));
                }
                Err(AppError::CodeCollision) => {
                    tracing::warn!(attempt, "Short code taken by a concurrent insert");
                    metrics::counter!("code_collisions_total").increment(1);
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::CodeCollision)
    }

    /// Lists the active links owned by `owner_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_owned(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        self.link_repository.list_active_by_owner(owner_id).await
    }

    /// Replaces the destination of a link owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::LinkNotFound`] if the link does not exist, is deleted,
    /// or belongs to another user.
    /// Returns [`AppError::Validation`] if the new URL is invalid.
    pub async fn update(
        &self,
        link_id: i64,
        new_original_url: &str,
        owner_id: i64,
    ) -> Result<Link, AppError> {
        validate_target_url(new_original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let mut link = self.find_owned(link_id, owner_id).await?;
        link.original_url = new_original_url.to_string();

        let saved = self.link_repository.save(link).await?;
        tracing::info!(link_id, owner_id, "Link destination updated");

        Ok(saved)
    }

    /// Soft-deletes a link owned by `owner_id`.
    ///
    /// A second call for the same link fails like a call for a missing link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::LinkNotFound`] under the same conditions as [`Self::update`].
    pub async fn delete(&self, link_id: i64, owner_id: i64) -> Result<(), AppError> {
        let mut link = self.find_owned(link_id, owner_id).await?;
        link.deleted_at = Some(Utc::now());

        self.link_repository.save(link).await?;
        tracing::info!(link_id, owner_id, "Link soft-deleted");

        Ok(())
    }

    /// Resolves a short code for redirection and counts the click.
    ///
    /// Returns the link after the increment. Every successful call counts
    /// exactly one click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::LinkNotFound`] if no active link uses the code.
    pub async fn resolve_for_redirect(&self, code: &str) -> Result<Link, AppError> {
        if !is_well_formed_code(code) {
            return Err(AppError::LinkNotFound);
        }

        let link = self
            .link_repository
            .increment_clicks(code)
            .await?
            .ok_or(AppError::LinkNotFound)?;

        metrics::counter!("link_redirects_total").increment(1);
        tracing::debug!(code, clicks = link.click_count, "Short link resolved");

        Ok(link)
    }

    /// Counts active links. Also serves as the database health probe.
    pub async fn count_active(&self) -> Result<i64, AppError> {
        self.link_repository.count_active().await
    }

    /// Constructs the full short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }

    async fn find_owned(&self, link_id: i64, owner_id: i64) -> Result<Link, AppError> {
        self.link_repository
            .find_active_by_id_and_owner(link_id, owner_id)
            .await?
            .ok_or_else(|| {
                tracing::debug!(link_id, owner_id, "No active link for this owner");
                AppError::LinkNotFound
            })
    }
}
