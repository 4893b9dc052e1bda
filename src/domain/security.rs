//! Opaque security capabilities consumed by the auth services.
//!
//! The services never touch a hashing or signing algorithm directly. Concrete
//! implementations live in [`crate::infrastructure::security`].

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Claims carried by an access token.
///
/// `sub` holds the user id as a decimal string. `exp` is only present when
/// the signer is configured with a lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Builds claims for `user_id` issued now, without expiry.
    pub fn for_user(user_id: i64, email: &str) -> Self {
        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: Utc::now().timestamp(),
            exp: None,
        }
    }

    /// Parses the user id out of `sub`.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// One-way password hashing and comparison.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password for storage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the hashing primitive fails.
    fn hash(&self, plaintext: &str) -> Result<String, AppError>;

    /// Returns true if `plaintext` matches the stored `hash`.
    ///
    /// Malformed hashes compare as a mismatch.
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}

/// Token signing and verification.
#[cfg_attr(test, mockall::automock)]
pub trait TokenSigner: Send + Sync {
    /// Signs claims into a bearer token.
    ///
    /// Fills in `exp` when the signer has a configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    fn sign(&self, claims: Claims) -> Result<String, AppError>;

    /// Verifies a token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidToken`] for bad signatures, expired tokens
    /// and malformed input alike.
    fn verify(&self, token: &str) -> Result<Claims, AppError>;
}
