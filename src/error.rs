//! Application error type and its HTTP representation.
//!
//! Core operations fail with one of the link/auth kinds
//! ([`AppError::InvalidCredentials`], [`AppError::MissingToken`],
//! [`AppError::InvalidToken`], [`AppError::UserNotFound`],
//! [`AppError::CodeCollision`], [`AppError::LinkNotFound`]). The remaining
//! variants cover input validation and infrastructure failures.

use axum::{
    Json,
    extract::rejection::PathRejection,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Unknown email or wrong password. The two cases are never distinguished.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No token provided")]
    MissingToken,

    /// Malformed, tampered or expired bearer token.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Short code already exists")]
    CodeCollision,

    /// Link is missing, soft-deleted, or owned by someone else.
    #[error("Link not found or already deleted")]
    LinkNotFound,

    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns true for failures produced while resolving a caller identity.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials | Self::MissingToken | Self::InvalidToken | Self::UserNotFound
        )
    }

    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::MissingToken => "missing_token",
            Self::InvalidToken => "invalid_token",
            Self::UserNotFound => "user_not_found",
            Self::CodeCollision => "code_collision",
            Self::LinkNotFound => "link_not_found",
            Self::Validation { .. } => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Internal { .. } => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::MissingToken | Self::InvalidToken | Self::UserNotFound => {
                StatusCode::UNAUTHORIZED
            }
            Self::CodeCollision | Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::LinkNotFound | Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the client-facing payload.
    ///
    /// Internal error details are never exposed.
    pub fn to_error_info(&self) -> ErrorInfo {
        let details = match self {
            Self::Validation { details, .. }
            | Self::NotFound { details, .. }
            | Self::Conflict { details, .. } => details.clone(),
            _ => json!({}),
        };

        ErrorInfo {
            code: self.code(),
            message: self.to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        let mut response = (status, Json(body)).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Validation failed", details)
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::bad_request(
            "Invalid path parameter",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
