//! HS256 JSON Web Token signer.

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::json;

use crate::domain::security::{Claims, TokenSigner};
use crate::error::AppError;

/// Signs and verifies access tokens with a shared secret.
///
/// Expiry is a property of the signer: with `ttl = None` tokens carry no
/// `exp` claim and never expire. With a ttl, `exp` is stamped at signing
/// time and enforced on verification.
pub struct JwtSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Option<Duration>,
    validation: Validation,
}

impl JwtSigner {
    pub fn new(secret: &str, ttl: Option<Duration>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        if ttl.is_some() {
            validation.set_required_spec_claims(&["sub", "exp"]);
        } else {
            validation.set_required_spec_claims(&["sub"]);
        }

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            validation,
        }
    }

    /// Creates a signer whose tokens expire after `minutes`, or never when `None`.
    pub fn with_expiry_minutes(secret: &str, minutes: Option<u64>) -> Self {
        Self::new(secret, minutes.map(|m| Duration::minutes(m as i64)))
    }
}

impl TokenSigner for JwtSigner {
    fn sign(&self, mut claims: Claims) -> Result<String, AppError> {
        if let Some(ttl) = self.ttl {
            claims.exp = Some(claims.iat + ttl.num_seconds());
        }

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            AppError::internal("Failed to sign token", json!({ "reason": e.to_string() }))
        })
    }

    fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token verification failed");
                AppError::InvalidToken
            })
    }
}
