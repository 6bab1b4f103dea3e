//! API error handling.
//!
//! Every failure leaves the service as `{ "is_success": false, "error": ... }`
//! with a matching status code.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message returned for any unexpected failure. Details stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message returned for unknown routes.
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Route not found";

// =============================================================================
// API Error
// =============================================================================

/// Error envelope for JSON responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Always `false`.
    pub is_success: bool,
    /// Human-readable error message.
    pub error: String,
}

impl ApiError {
    /// Creates a new API error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            error: message.into(),
        }
    }
}

// =============================================================================
// API Error Response
// =============================================================================

/// API error response containing status code and error envelope.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Error envelope.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a new API error response.
    #[must_use]
    pub const fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// Creates a 400 Bad Request response.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::new(message))
    }

    /// Creates a 404 Not Found response.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiError::new(message))
    }

    /// Creates a 413 Payload Too Large response.
    #[must_use]
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(StatusCode::PAYLOAD_TOO_LARGE, ApiError::new(message))
    }

    /// Creates a 500 Internal Server Error response with the generic message.
    #[must_use]
    pub fn internal_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new(INTERNAL_ERROR_MESSAGE),
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

// =============================================================================
// Classify Error
// =============================================================================

/// Reasons a classification request is rejected before classification runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// `data` is missing, `null`, or not an array.
    #[error("Invalid input: 'data' must be an array")]
    DataNotArray,

    /// The body is not a JSON object with a JSON content type.
    #[error("Invalid request body: {0}")]
    MalformedBody(String),

    /// The body exceeds the configured limit.
    #[error("Request body exceeds the size limit")]
    BodyTooLarge,
}

impl From<JsonRejection> for ClassifyError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::BodyTooLarge
        } else {
            Self::MalformedBody(rejection.body_text())
        }
    }
}

impl From<ClassifyError> for ApiErrorResponse {
    fn from(error: ClassifyError) -> Self {
        match error {
            ClassifyError::BodyTooLarge => Self::payload_too_large(error.to_string()),
            ClassifyError::DataNotArray | ClassifyError::MalformedBody(_) => {
                Self::bad_request(error.to_string())
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
