//! Issuing and verifying bearer tokens.

use std::sync::Arc;

use crate::domain::entities::PublicUser;
use crate::domain::security::{Claims, TokenSigner};
use crate::error::AppError;

/// Issues access tokens for users and verifies presented tokens.
///
/// Expiry is decided by the configured [`TokenSigner`], not here.
pub struct TokenService {
    signer: Arc<dyn TokenSigner>,
}

impl TokenService {
    pub fn new(signer: Arc<dyn TokenSigner>) -> Self {
        Self { signer }
    }

    /// Issues a token carrying the user's id and email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    pub fn issue(&self, user: &PublicUser) -> Result<String, AppError> {
        self.signer.sign(Claims::for_user(user.id, &user.email))
    }

    /// Verifies a token and returns its claims.
    ///
    /// Bad signatures, malformed tokens, expired tokens, tokens whose subject
    /// is not a user id and any signer failure all yield the same error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidToken`].
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.signer.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Signer rejected token");
            AppError::InvalidToken
        })?;

        if claims.user_id().is_none() {
            tracing::debug!(sub = %claims.sub, "Token subject is not a user id");
            return Err(AppError::InvalidToken);
        }

        Ok(claims)
    }
}
