//! HTTP handlers for the classification API.
//!
//! The handlers only translate between HTTP and the pure classifier in
//! [`crate::domain`]. Validation failures become 400 responses before the
//! classifier runs; nothing inside classification can fail.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use super::dto::{ClassifyRequest, ClassifyResponse};
use super::error::{ApiErrorResponse, ClassifyError, ROUTE_NOT_FOUND_MESSAGE};
use crate::config::IdentityConfig;
use crate::domain::classify;

/// Operation code reported by `GET /bfhl`.
pub const OPERATION_CODE: u8 = 1;

/// Service name reported by the health check.
pub const SERVICE_NAME: &str = "BFHL API";

// =============================================================================
// Application State
// =============================================================================

/// Shared, read-only application dependencies.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Identity details echoed in every classification response.
    pub identity: Arc<IdentityConfig>,
}

impl AppState {
    /// Creates a new `AppState` from identity details.
    #[must_use]
    pub fn new(identity: IdentityConfig) -> Self {
        Self {
            identity: Arc::new(identity),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(IdentityConfig::default())
    }
}

// =============================================================================
// POST /bfhl Handler
// =============================================================================

/// Classifies the tokens in `data`.
///
/// # Request Body
///
/// ```json
/// { "data": ["a", "1", "334", "4", "R", "$"] }
/// ```
///
/// # Response
///
/// - **200 OK**: classification with identity details
/// - **400 Bad Request**: `data` is not an array, or the body is not a JSON object
/// - **413 Payload Too Large**: body exceeds the configured limit
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] when the request is rejected before
/// classification.
pub async fn classify_data(
    State(state): State<AppState>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<ClassifyResponse>, ApiErrorResponse> {
    let tokens = payload
        .map_err(ClassifyError::from)
        .and_then(|Json(request)| request.into_tokens())
        .map_err(|error| {
            tracing::warn!(%error, "Rejected classification request");
            ApiErrorResponse::from(error)
        })?;

    let result = classify(&tokens);
    tracing::debug!(
        tokens = tokens.len(),
        odd = result.odd_numbers.len(),
        even = result.even_numbers.len(),
        alphabets = result.alphabets.len(),
        special = result.special_characters.len(),
        "Classified request data"
    );

    Ok(Json(ClassifyResponse::new(&state.identity, result)))
}

// =============================================================================
// GET /bfhl Handler
// =============================================================================

/// Body of `GET /bfhl`.
#[derive(Debug, Clone, Serialize)]
pub struct OperationCodeResponse {
    /// Fixed operation code.
    pub operation_code: u8,
}

/// Returns the fixed operation code.
pub async fn operation_code() -> Json<OperationCodeResponse> {
    Json(OperationCodeResponse {
        operation_code: OPERATION_CODE,
    })
}

// =============================================================================
// GET /health Handler
// =============================================================================

/// Health check response body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Current UTC time, RFC 3339 with milliseconds.
    pub timestamp: String,
    /// Service name.
    pub service: &'static str,
}

/// Health check endpoint.
///
/// ```json
/// { "status": "OK", "timestamp": "2024-01-01T00:00:00.000Z", "service": "BFHL API" }
/// ```
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        service: SERVICE_NAME,
    })
}

// =============================================================================
// GET / Handler
// =============================================================================

/// Endpoint summary listed by the banner.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointSummary {
    /// Classification endpoint.
    pub post: &'static str,
    /// Operation code endpoint.
    pub get: &'static str,
    /// Health check endpoint.
    pub health: &'static str,
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct BannerResponse {
    /// Greeting.
    pub message: &'static str,
    /// Available endpoints.
    pub endpoints: EndpointSummary,
}

/// Service banner.
pub async fn service_banner() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "BFHL REST API is running",
        endpoints: EndpointSummary {
            post: "/bfhl - Process data array",
            get: "/bfhl - Get operation code",
            health: "/health - Health check",
        },
    })
}

// =============================================================================
// Fallback
// =============================================================================

/// 404 for any route not registered.
pub async fn route_not_found() -> ApiErrorResponse {
    ApiErrorResponse::not_found(ROUTE_NOT_FOUND_MESSAGE)
}

// =============================================================================
// Tests
// =============================================================================
