//! Runs password hashing on the blocking thread pool.
//!
//! Argon2 takes tens of milliseconds of CPU per call, long enough to stall
//! every other request scheduled on the same async worker.

use std::sync::Arc;

use serde_json::json;
use tokio::task::{JoinError, spawn_blocking};

use crate::domain::security::PasswordHasher;
use crate::error::AppError;

/// Hashes `plaintext` with `hasher` off the async workers.
pub(crate) async fn hash_password(
    hasher: &Arc<dyn PasswordHasher>,
    plaintext: &str,
) -> Result<String, AppError> {
    let hasher = Arc::clone(hasher);
    let plaintext = plaintext.to_string();

    spawn_blocking(move || hasher.hash(&plaintext))
        .await
        .map_err(join_failed)?
}

/// Compares `plaintext` against a stored `hash` off the async workers.
pub(crate) async fn verify_password(
    hasher: &Arc<dyn PasswordHasher>,
    plaintext: &str,
    hash: &str,
) -> Result<bool, AppError> {
    let hasher = Arc::clone(hasher);
    let plaintext = plaintext.to_string();
    let hash = hash.to_string();

    spawn_blocking(move || hasher.verify(&plaintext, &hash))
        .await
        .map_err(join_failed)
}

fn join_failed(e: JoinError) -> AppError {
    tracing::error!(error = %e, "Password hashing task failed");
    AppError::internal("Password hashing failed", json!({}))
}
