//! Bearer token extractors.
//!
//! Handlers declare how much identity they need by taking one of these as an
//! argument:
//!
//! - [`AuthUser`] - mandatory; the request is rejected with `401 Unauthorized`
//!   unless a valid token for an existing user is presented
//! - [`MaybeUser`] - best-effort; any missing or unusable token makes the
//!   caller anonymous
//!
//! # Header Format
//!
//! ```text
//! Authorization: Bearer <token>
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::domain::entities::PublicUser;
use crate::{error::AppError, state::AppState};

/// The authenticated caller.
///
/// # Errors
///
/// Rejects with [`AppError::MissingToken`], [`AppError::InvalidToken`] or
/// [`AppError::UserNotFound`], all rendered as `401` with
/// `WWW-Authenticate: Bearer`.
///
/// # Example
///
/// ```rust,ignore
/// async fn list_links_handler(AuthUser(user): AuthUser, State(state): State<AppState>) { .. }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub PublicUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state
            .identity_resolver
            .resolve(&parts.headers)
            .await
            .map(AuthUser)
    }
}

/// The caller if one could be identified, otherwise `None`.
///
/// Never rejects.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<PublicUser>);

impl MaybeUser {
    pub fn id(&self) -> Option<i64> {
        self.0.as_ref().map(|user| user.id)
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(
            state.identity_resolver.resolve_optional(&parts.headers).await,
        ))
    }
}
