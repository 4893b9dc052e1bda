//! Credential verification for email/password login.

use std::sync::Arc;

use crate::domain::entities::PublicUser;
use crate::domain::repositories::UserRepository;
use crate::application::services::password::verify_password;
use crate::domain::security::PasswordHasher;
use crate::error::AppError;

/// Checks email/password pairs against stored users.
///
/// An unknown email and a wrong password produce the same
/// [`AppError::InvalidCredentials`], so callers cannot probe for accounts.
pub struct AuthService<U: UserRepository + ?Sized> {
    repository: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<U: UserRepository + ?Sized> AuthService<U> {
    /// Creates a new authentication service.
    pub fn new(repository: Arc<U>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// Verifies credentials and returns the user without its password hash.
    ///
    /// The email is matched exactly, including case.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidCredentials`] if the email is unknown or the
    /// password does not match.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<PublicUser, AppError> {
        let Some(user) = self.repository.find_by_email(email).await? else {
            tracing::debug!("Login attempt for unknown email");
            metrics::counter!("auth_failures_total", "kind" => "invalid_credentials").increment(1);
            return Err(AppError::InvalidCredentials);
        };

        if !verify_password(&self.hasher, password, &user.password_hash).await? {
            tracing::debug!(user_id = user.id, "Login attempt with wrong password");
            metrics::counter!("auth_failures_total", "kind" => "invalid_credentials").increment(1);
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!(user_id = user.id, "User authenticated");

        Ok(user.into_public())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::User;
    use crate::domain::repositories::MockUserRepository;
    use crate::domain::security::MockPasswordHasher;
    use chrono::Utc;

    fn stored_user() -> User {
        let now = Utc::now();
        User {
            id: 1,
            email: "u1@example.com".to_string(),
            password_hash: "stored-hash".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_verify_credentials_success() {
        let mut mock_repo = MockUserRepository::new();
        let mut mock_hasher = MockPasswordHasher::new();

        mock_repo
            .expect_find_by_email()
            .withf(|email| email == "u1@example.com")
            .times(1)
            .returning(|_| Ok(Some(stored_user())));

        mock_hasher
            .expect_verify()
            .withf(|plain, hash| plain == "correct-horse" && hash == "stored-hash")
            .times(1)
            .returning(|_, _| true);

        let service = AuthService::new(Arc::new(mock_repo), Arc::new(mock_hasher));

        let user = service
            .verify_credentials("u1@example.com", "correct-horse")
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.email, "u1@example.com");
    }

    #[tokio::test]
    async fn test_verify_credentials_wrong_password() {
        let mut mock_repo = MockUserRepository::new();
        let mut mock_hasher = MockPasswordHasher::new();

        mock_repo
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_user())));

        mock_hasher
            .expect_verify()
            .times(1)
            .returning(|_, _| false);

        let service = AuthService::new(Arc::new(mock_repo), Arc::new(mock_hasher));

        let err = service
            .verify_credentials("u1@example.com", "wrong")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_verify_credentials_unknown_email_looks_the_same() {
        let mut mock_repo = MockUserRepository::new();
        let mut mock_hasher = MockPasswordHasher::new();

        mock_repo
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        mock_hasher.expect_verify().times(0);

        let service = AuthService::new(Arc::new(mock_repo), Arc::new(mock_hasher));

        let err = service
            .verify_credentials("nobody@example.com", "whatever")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidCredentials));
        assert_eq!(err.to_error_info().details, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_verify_credentials_email_is_case_sensitive() {
        let mut mock_repo = MockUserRepository::new();
        let mock_hasher = MockPasswordHasher::new();

        mock_repo
            .expect_find_by_email()
            .withf(|email| email == "U1@EXAMPLE.COM")
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock_repo), Arc::new(mock_hasher));

        let result = service
            .verify_credentials("U1@EXAMPLE.COM", "correct-horse")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
    }
}
