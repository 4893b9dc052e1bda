//! DTOs for the login endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Issued access token.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
}
