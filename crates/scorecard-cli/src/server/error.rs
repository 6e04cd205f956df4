//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from client.
    BadRequest(String),
    /// Caller is not allowed to use this endpoint.
    Forbidden(String),
    /// Internal server error.
    Internal(String),
    /// Error from the scorecard library.
    Scorecard(scorecard::ScorecardError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
            ApiError::Scorecard(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "scorecard_error",
                format!("Error processing file: {}", e),
            ),
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<scorecard::ScorecardError> for ApiError {
    fn from(err: scorecard::ScorecardError) -> Self {
        ApiError::Scorecard(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Scorecard(e) => write!(f, "Scorecard error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}
