//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// "Active" means `deleted_at IS NULL`. Every lookup used by the link service
/// only ever sees active rows.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_pg.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link with a click count of zero.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeCollision`] if an active link already uses the code.
    /// This is the authoritative uniqueness check; callers may pre-check but must
    /// not rely on it.
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds an active link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_active_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Finds an active link with the given id that belongs to `owner_id`.
    ///
    /// Returns `Ok(None)` both when the link does not exist and when another
    /// user owns it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_active_by_id_and_owner(
        &self,
        id: i64,
        owner_id: i64,
    ) -> Result<Option<Link>, AppError>;

    /// Lists active links owned by `owner_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_active_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError>;

    /// Persists `original_url` and `deleted_at` of an existing link and
    /// refreshes `updated_at`.
    ///
    /// The write only applies while the stored row is still active and still
    /// has `link.owner_id`, so a stale copy can never revive a deleted link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::LinkNotFound`] if the row no longer exists, was
    /// soft-deleted in the meantime, or changed owner.
    /// Returns [`AppError::Internal`] on database errors.
    async fn save(&self, link: Link) -> Result<Link, AppError>;

    /// Atomically increments the click counter of the active link with `code`
    /// and returns the updated row.
    ///
    /// Returns `Ok(None)` if no active link uses the code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_clicks(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Counts active links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_active(&self) -> Result<i64, AppError>;
}
