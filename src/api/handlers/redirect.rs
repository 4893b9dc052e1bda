//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /urls/{code}`
///
/// The click is counted before the response is sent, so a client that
/// receives the redirect has already been counted.
///
/// # Response
///
/// `302 Found` with the original URL in `Location`.
///
/// # Errors
///
/// Returns 404 Not Found if no active link uses the code.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.resolve_for_redirect(&code).await?;

    let location = HeaderValue::from_str(&link.original_url).map_err(|e| {
        tracing::error!(link_id = link.id, error = %e, "Stored destination is not a valid header value");
        AppError::internal(
            "Stored destination cannot be redirected to",
            json!({ "link_id": link.id }),
        )
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}
