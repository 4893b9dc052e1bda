//! User account management.

use std::sync::Arc;

use crate::domain::entities::{NewUser, PublicUser, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::application::services::password::hash_password;
use crate::domain::security::PasswordHasher;
use crate::error::AppError;
use serde_json::json;
use validator::ValidateEmail;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Registration, profile updates and removal of user accounts.
///
/// Passwords are hashed here and never leave the service in any form.
pub struct UserService<U: UserRepository + ?Sized> {
    repository: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<U: UserRepository + ?Sized> UserService<U> {
    pub fn new(repository: Arc<U>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed email or short password.
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn register(&self, email: &str, password: &str) -> Result<PublicUser, AppError> {
        validate_email(email)?;
        validate_password(password)?;

        let password_hash = hash_password(&self.hasher, password).await?;

        let user = self
            .repository
            .create(NewUser {
                email: email.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered");

        Ok(user.into_public())
    }

    /// Returns a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn get(&self, id: i64) -> Result<PublicUser, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .map(|user| user.into_public())
            .ok_or_else(|| user_not_found(id))
    }

    /// Lists every user, ordered by id.
    pub async fn list(&self) -> Result<Vec<PublicUser>, AppError> {
        let users = self.repository.list().await?;
        Ok(users.into_iter().map(|u| u.into_public()).collect())
    }

    /// Changes a user's email and/or password.
    ///
    /// A new password is re-hashed before storage. With neither field set the
    /// current record is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed email or short password.
    /// Returns [`AppError::Conflict`] if the new email is taken.
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn update(
        &self,
        id: i64,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<PublicUser, AppError> {
        if let Some(email) = email {
            validate_email(email)?;
        }

        let password_hash = match password {
            Some(password) => {
                validate_password(password)?;
                Some(hash_password(&self.hasher, password).await?)
            }
            None => None,
        };

        let patch = UserPatch {
            email: email.map(str::to_string),
            password_hash,
        };

        if patch.is_empty() {
            return self.get(id).await;
        }

        let user = self
            .repository
            .update(id, patch)
            .await?
            .ok_or_else(|| user_not_found(id))?;

        tracing::info!(user_id = id, "User updated");

        Ok(user.into_public())
    }

    /// Deletes a user. Their links stay reachable and become anonymous.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(user_not_found(id));
        }

        tracing::info!(user_id = id, "User deleted");

        Ok(())
    }
}

fn user_not_found(id: i64) -> AppError {
    AppError::not_found("User not found", json!({ "id": id }))
}

fn validate_email(email: &str) -> Result<(), AppError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(AppError::bad_request(
            "Invalid email address",
            json!({ "field": "email" }),
        ))
    }
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() >= MIN_PASSWORD_LENGTH {
        Ok(())
    } else {
        Err(AppError::bad_request(
            "Password is too short",
            json!({ "field": "password", "min_length": MIN_PASSWORD_LENGTH }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::User;
    use crate::domain::repositories::MockUserRepository;
    use crate::domain::security::MockPasswordHasher;
    use chrono::Utc;

    fn stored_user(id: i64, email: &str, hash: &str) -> User {
        let now = Utc::now();
        User {
            id,
            email: email.to_string(),
            password_hash: hash.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn hasher() -> MockPasswordHasher {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .returning(|plain| Ok(format!("hashed:{plain}")));
        hasher
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_create()
            .withf(|new_user| {
                new_user.email == "u1@example.com" && new_user.password_hash == "hashed:password1"
            })
            .times(1)
            .returning(|new_user| Ok(stored_user(1, &new_user.email, &new_user.password_hash)));

        let service = UserService::new(Arc::new(mock_repo), Arc::new(hasher()));
        let user = service
            .register("u1@example.com", "password1")
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.email, "u1@example.com");
    }

    #[tokio::test]
    async fn test_register_rejects_bad_input() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_create().times(0);

        let service = UserService::new(Arc::new(mock_repo), Arc::new(hasher()));

        let err = service.register("not-an-email", "password1").await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        let err = service.register("u1@example.com", "short").await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo.expect_create().times(1).returning(|_| {
            Err(AppError::conflict(
                "Email is already registered",
                json!({ "field": "email" }),
            ))
        });

        let service = UserService::new(Arc::new(mock_repo), Arc::new(hasher()));
        let err = service
            .register("u1@example.com", "password1")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let service = UserService::new(Arc::new(mock_repo), Arc::new(hasher()));

        assert!(matches!(
            service.get(9).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_update_rehashes_password() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_update()
            .withf(|id, patch| {
                *id == 1
                    && patch.email.is_none()
                    && patch.password_hash.as_deref() == Some("hashed:new-password")
            })
            .times(1)
            .returning(|id, patch| {
                Ok(Some(stored_user(
                    id,
                    "u1@example.com",
                    &patch.password_hash.unwrap_or_default(),
                )))
            });

        let service = UserService::new(Arc::new(mock_repo), Arc::new(hasher()));
        let user = service
            .update(1, None, Some("new-password"))
            .await
            .unwrap();

        assert_eq!(user.id, 1);
    }

    #[tokio::test]
    async fn test_update_without_changes_returns_current() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo.expect_update().times(0);
        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(stored_user(id, "u1@example.com", "h"))));

        let service = UserService::new(Arc::new(mock_repo), Arc::new(hasher()));
        let user = service.update(1, None, None).await.unwrap();

        assert_eq!(user.email, "u1@example.com");
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_update().returning(|_, _| Ok(None));

        let service = UserService::new(Arc::new(mock_repo), Arc::new(hasher()));
        let err = service
            .update(1, Some("u2@example.com"), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let mut mock_repo = MockUserRepository::new();
        let mut seq = mockall::Sequence::new();

        mock_repo
            .expect_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));
        mock_repo
            .expect_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(false));

        let service = UserService::new(Arc::new(mock_repo), Arc::new(hasher()));

        assert!(service.delete(1).await.is_ok());
        assert!(matches!(
            service.delete(1).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }
}
