//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user accounts.
///
/// Returned [`User`] values carry the password hash; services strip it before
/// handing users to callers.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds a user by database ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Finds a user by exact (case-sensitive) email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Lists all users ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Applies a partial update and refreshes `updated_at`.
    ///
    /// Returns `Ok(None)` if the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new email is taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i64, patch: UserPatch) -> Result<Option<User>, AppError>;

    /// Deletes a user. Links owned by the user become anonymous.
    ///
    /// Returns `Ok(false)` if the user did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
