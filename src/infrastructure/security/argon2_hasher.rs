//! Argon2id password hashing.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use serde_json::json;

use crate::domain::security::PasswordHasher;
use crate::error::AppError;

/// Hashes passwords with Argon2id using the crate's default parameters.
///
/// Hashes are stored in PHC string format (`$argon2id$v=19$...`), so the
/// parameters travel with each hash.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                AppError::internal("Password hashing failed", json!({ "reason": e.to_string() }))
            })
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            tracing::warn!("Stored password hash is not in PHC format");
            return false;
        };

        Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}
