//! Common test helpers for integration tests.
//!
//! Builds the router in-process and drives it with `tower::ServiceExt::oneshot`.
//!
//! # Note
//!
//! The `#![allow(dead_code)]` attribute is necessary because Rust compiles each
//! integration test file as a separate crate, and not every file uses every helper.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use bfhl_classifier::api::{AppState, build_router};
use bfhl_classifier::config::IdentityConfig;

/// Body limit used by test routers.
pub const TEST_BODY_LIMIT: usize = 64 * 1024;

/// Response status, headers and parsed JSON body.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Creates a router with the default identity.
pub fn create_test_router() -> Router {
    build_router(AppState::default(), TEST_BODY_LIMIT)
}

/// Creates a router with the given identity and body limit.
pub fn create_router_with(identity: IdentityConfig, body_limit_bytes: usize) -> Router {
    build_router(AppState::new(identity), body_limit_bytes)
}

/// Sends `request` and collects the JSON response.
pub async fn send(router: Router, request: Request<Body>) -> TestResponse {
    let response = router
        .oneshot(request)
        .await
        .expect("router is infallible");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to collect body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        headers,
        body,
    }
}

/// Sends a `GET` request.
pub async fn get(router: Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");
    send(router, request).await
}

/// Sends a `POST` request with a JSON body.
pub async fn post_json(router: Router, uri: &str, body: &Value) -> TestResponse {
    post_raw(router, uri, body.to_string(), Some("application/json")).await
}

/// Sends a `POST` request with an arbitrary body and optional content type.
pub async fn post_raw(
    router: Router,
    uri: &str,
    body: impl Into<Body>,
    content_type: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    let request = builder.body(body.into()).expect("valid request");
    send(router, request).await
}

/// Asserts the standard failure envelope.
pub fn assert_error_envelope(response: &TestResponse, status: StatusCode) {
    assert_eq!(response.status, status, "unexpected status: {:?}", response.body);
    assert_eq!(response.body["is_success"], Value::Bool(false));
    assert!(
        response.body["error"].is_string(),
        "error message missing: {:?}",
        response.body
    );
}
