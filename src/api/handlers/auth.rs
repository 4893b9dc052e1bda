//! Handler for the login endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::auth::{LoginRequest, TokenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Exchanges email and password for an access token.
///
/// # Endpoint
///
/// `POST /auth/login`
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com", "password": "secret123" }
/// ```
///
/// # Response
///
/// ```json
/// { "access_token": "eyJhbGciOiJIUzI1NiJ9..." }
/// ```
///
/// # Errors
///
/// Returns 401 Unauthorized for an unknown email or a wrong password alike.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    payload.validate()?;

    let user = state
        .auth_service
        .verify_credentials(&payload.email, &payload.password)
        .await?;

    let access_token = state.token_service.issue(&user)?;

    Ok(Json(TokenResponse { access_token }))
}
