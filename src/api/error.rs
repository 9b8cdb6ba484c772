use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use serde::Serialize;

use crate::services::AccountError;

/// HTTP-boundary error. Status mapping follows the legacy surface:
/// product write failures answer 400 while read failures answer 500,
/// and a duplicate username is a 400 with its own message rather than
/// a generic failure.
#[derive(Debug)]
pub enum ApiError {
    ValidationError(String),

    Unauthorized(String),

    Conflict(String),

    WriteFailed(String),

    DatabaseError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::WriteFailed(msg) => write!(f, "Write failed: {msg}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            Self::ValidationError(msg) | Self::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Self::WriteFailed(msg) => {
                tracing::warn!("Write failed: {msg}");
                (StatusCode::BAD_REQUEST, msg)
            }
            Self::DatabaseError(msg) => {
                tracing::error!("Database error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = ErrorBody {
            error: error_message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidCredentials => Self::Unauthorized(err.to_string()),
            AccountError::UsernameTaken => Self::Conflict(err.to_string()),
            AccountError::Validation(msg) => Self::ValidationError(msg),
            AccountError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}
