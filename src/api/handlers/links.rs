//! Handlers for creating and managing short links.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{LinkRequest, LinkResponse, ShortenResponse};
use crate::api::middleware::{AuthUser, MaybeUser};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /urls/shorten`
///
/// # Authentication
///
/// Optional. With a valid bearer token the link is owned by the caller;
/// without one, or with an unusable one, the link is anonymous.
///
/// # Request Body
///
/// ```json
/// { "originalUrl": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "short_url": "http://localhost:3077/urls/aB3_x9" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for an invalid URL.
/// Returns 409 Conflict if no free code was found.
pub async fn shorten_handler(
    State(state): State<AppState>,
    caller: MaybeUser,
    Json(payload): Json<LinkRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let short_url = state
        .link_service
        .shorten(&payload.original_url, caller.id())
        .await?;

    Ok((StatusCode::CREATED, Json(ShortenResponse { short_url })))
}

/// Lists the caller's active links, newest first.
///
/// # Endpoint
///
/// `GET /urls`
///
/// # Errors
///
/// Returns 401 Unauthorized without a valid bearer token.
pub async fn list_links_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_owned(user.id).await?;

    let items = links
        .into_iter()
        .map(|link| {
            let short_url = state.link_service.short_url(&link.code);
            LinkResponse::from_link(link, short_url)
        })
        .collect();

    Ok(Json(items))
}

/// Changes the destination of one of the caller's links.
///
/// # Endpoint
///
/// `PUT /urls/{id}`
///
/// # Errors
///
/// Returns 400 Bad Request for a non-numeric id or an invalid URL.
/// Returns 401 Unauthorized without a valid bearer token.
/// Returns 404 Not Found if the link is missing, deleted or not the caller's.
pub async fn update_link_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    id: Result<Path<i64>, PathRejection>,
    Json(payload): Json<LinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    let Path(id) = id?;
    payload.validate()?;

    let link = state
        .link_service
        .update(id, &payload.original_url, user.id)
        .await?;
    let short_url = state.link_service.short_url(&link.code);

    Ok(Json(LinkResponse::from_link(link, short_url)))
}

/// Soft-deletes one of the caller's links.
///
/// # Endpoint
///
/// `DELETE /urls/{id}`
///
/// # Response
///
/// `204 No Content`
///
/// # Errors
///
/// Returns 400 Bad Request for a non-numeric id.
/// Returns 401 Unauthorized without a valid bearer token.
/// Returns 404 Not Found if the link is missing, already deleted or not the caller's.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.link_service.delete(id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
