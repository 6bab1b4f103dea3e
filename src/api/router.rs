//! Route table and middleware stack.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use super::error::ApiErrorResponse;
use super::handlers::{
    AppState, classify_data, health_check, operation_code, route_not_found, service_banner,
};

/// Builds the complete application router.
pub fn build_router(state: AppState, body_limit_bytes: usize) -> Router {
    let routes = Router::new()
        .route("/", get(service_banner))
        .route("/health", get(health_check))
        .route("/bfhl", get(operation_code).post(classify_data))
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found);

    with_middleware(routes, body_limit_bytes).with_state(state)
}

/// Wraps `router` in the service middleware: body limit, panic containment,
/// security headers, request tracing and permissive CORS.
pub fn with_middleware<S>(router: Router<S>, body_limit_bytes: usize) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Turns a handler panic into the generic 500 envelope.
fn handle_panic(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(detail, "Handler panicked");

    ApiErrorResponse::internal_error().into_response()
}
