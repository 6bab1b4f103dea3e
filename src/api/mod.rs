//! API module for HTTP handlers.
//!
//! This module contains route definitions and request/response handlers.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;

pub use dto::{ClassifyRequest, ClassifyResponse};
pub use error::{ApiError, ApiErrorResponse, ClassifyError};
pub use handlers::{
    AppState, BannerResponse, HealthResponse, OperationCodeResponse, classify_data, health_check,
    operation_code, route_not_found, service_banner,
};
pub use router::{build_router, with_middleware};
