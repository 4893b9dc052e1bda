//! Resolving the caller's identity from request headers.

use std::sync::Arc;

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

use crate::application::services::TokenService;
use crate::domain::entities::PublicUser;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// Returns `None` if the header is absent, not valid ASCII, uses another
/// scheme or carries an empty token.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();

    (!token.is_empty()).then_some(token)
}

/// Turns a bearer token into a user.
///
/// Use [`IdentityResolver::resolve`] where a user is required and
/// [`IdentityResolver::resolve_optional`] where an anonymous caller is
/// acceptable.
pub struct IdentityResolver<U: UserRepository + ?Sized> {
    users: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U: UserRepository + ?Sized> IdentityResolver<U> {
    pub fn new(users: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Resolves the caller, failing if no valid identity is presented.
    ///
    /// # Errors
    ///
    /// - [`AppError::MissingToken`] - no bearer token in the headers
    /// - [`AppError::InvalidToken`] - the token does not verify
    /// - [`AppError::UserNotFound`] - the token names a user that no longer exists
    /// - [`AppError::Internal`] - database error during the user lookup
    pub async fn resolve(&self, headers: &HeaderMap) -> Result<PublicUser, AppError> {
        let result = self.resolve_inner(headers).await;

        if let Err(e) = &result
            && e.is_auth_failure()
        {
            metrics::counter!("auth_failures_total", "kind" => e.code()).increment(1);
        }

        result
    }

    /// Resolves the caller if possible.
    ///
    /// Any failure, including a database error, is logged and treated as an
    /// anonymous caller.
    pub async fn resolve_optional(&self, headers: &HeaderMap) -> Option<PublicUser> {
        match self.resolve_inner(headers).await {
            Ok(user) => Some(user),
            Err(AppError::MissingToken) => None,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unusable credentials, continuing anonymously");
                None
            }
        }
    }

    async fn resolve_inner(&self, headers: &HeaderMap) -> Result<PublicUser, AppError> {
        let token = bearer_token(headers).ok_or(AppError::MissingToken)?;
        let claims = self.tokens.verify(token)?;
        let user_id = claims.user_id().ok_or(AppError::InvalidToken)?;

        let Some(user) = self.users.find_by_id(user_id).await? else {
            tracing::warn!(user_id, "Valid token for a user that no longer exists");
            return Err(AppError::UserNotFound);
        };

        Ok(user.into_public())
    }
}
