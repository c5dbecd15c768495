//! Error handling for the REST API server.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;
use tracing::debug;

use trivia_core::error::{ErrorKind, TriviaError};

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    // Common error constructors
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn method_not_allowed() -> Self {
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            "METHOD_NOT_ALLOWED",
            "method not allowed",
        )
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }

    /// Build from a stable error kind, using its public message.
    pub fn from_kind(kind: ErrorKind) -> Self {
        let message = kind.public_message();
        match kind {
            ErrorKind::NotFound => Self::not_found(message),
            ErrorKind::Unprocessable => Self::unprocessable(message),
            ErrorKind::Validation => Self::bad_request(message),
            ErrorKind::Internal => Self::internal(message),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.status, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            error: self.status.as_u16(),
            code: self.code,
            message: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}

// Details stay in the logs; clients only see the stable message.
impl From<TriviaError> for ApiError {
    fn from(err: TriviaError) -> Self {
        match err.kind() {
            ErrorKind::Internal => tracing::error!(error = %err, "Request failed"),
            _ => debug!(error = %err, code = err.code().as_str(), "Request rejected"),
        }
        ApiError::from_kind(err.kind())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection, "Rejected request body");
        ApiError::from_kind(ErrorKind::Validation)
    }
}

// Non-numeric ids never address a resource.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        debug!(error = %rejection, "Rejected path parameter");
        ApiError::from_kind(ErrorKind::NotFound)
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
