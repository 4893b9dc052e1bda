//! Handlers for user accounts.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::user::{RegisterRequest, UpdateUserRequest};
use crate::api::middleware::AuthUser;
use crate::domain::entities::PublicUser;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new user.
///
/// # Endpoint
///
/// `POST /users`
///
/// # Response
///
/// `201 Created` with the user, without its password hash.
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed email or a short password.
/// Returns 409 Conflict if the email is already registered.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .register(&payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Returns the caller's account.
///
/// `GET /users/me`
pub async fn me_handler(AuthUser(user): AuthUser) -> Json<PublicUser> {
    Json(user)
}

/// Updates the caller's email and/or password.
///
/// `PUT /users/me`
pub async fn update_me_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<PublicUser>, AppError> {
    payload.validate()?;

    let updated = state
        .user_service
        .update(
            user.id,
            payload.email.as_deref(),
            payload.password.as_deref(),
        )
        .await?;

    Ok(Json(updated))
}

/// Deletes the caller's account. Their links remain and become anonymous.
///
/// `DELETE /users/me`
pub async fn delete_me_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<StatusCode, AppError> {
    state.user_service.delete(user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
