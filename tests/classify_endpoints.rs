//! Integration tests for `POST /bfhl`.
//!
//! These tests drive the full router, middleware included, and check the
//! response envelope for successful and rejected requests.

mod common;

use axum::http::StatusCode;
use rstest::rstest;
use serde_json::{Value, json};

use bfhl_classifier::config::IdentityConfig;
use common::{
    assert_error_envelope, create_router_with, create_test_router, post_json, post_raw,
};

// =============================================================================
// Successful Classification
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_classify_mixed_tokens() {
    let response = post_json(
        create_test_router(),
        "/bfhl",
        &json!({ "data": ["a", "1", "334", "4", "R", "$"] }),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({
            "is_success": true,
            "user_id": "john_doe_17091999",
            "email": "john@xyz.com",
            "roll_number": "ABCD123",
            "odd_numbers": ["1"],
            "even_numbers": ["334", "4"],
            "alphabets": ["A", "R"],
            "special_characters": ["$"],
            "sum": "339",
            "concat_string": "rA"
        })
    );
}

#[rstest]
#[tokio::test]
async fn test_classify_empty_array() {
    let response = post_json(create_test_router(), "/bfhl", &json!({ "data": [] })).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["odd_numbers"], json!([]));
    assert_eq!(response.body["even_numbers"], json!([]));
    assert_eq!(response.body["alphabets"], json!([]));
    assert_eq!(response.body["special_characters"], json!([]));
    assert_eq!(response.body["sum"], "0");
    assert_eq!(response.body["concat_string"], "");
}

#[rstest]
#[tokio::test]
async fn test_classify_mixed_json_types() {
    let response = post_json(
        create_test_router(),
        "/bfhl",
        &json!({ "data": ["abc", "123", 45] }),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["alphabets"], json!(["ABC"]));
    assert_eq!(response.body["odd_numbers"], json!(["123", "45"]));
    assert_eq!(response.body["even_numbers"], json!([]));
    assert_eq!(response.body["sum"], "168");
    assert_eq!(response.body["concat_string"], "cBa");
}

#[rstest]
#[tokio::test]
async fn test_classify_negative_and_decimal_numbers() {
    let response = post_json(
        create_test_router(),
        "/bfhl",
        &json!({ "data": ["-5", "3.7", 2.5] }),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    // 3.7 and 2.5 are truncated to 3 and 2, never rounded
    assert_eq!(response.body["odd_numbers"], json!(["-5", "3.7"]));
    assert_eq!(response.body["even_numbers"], json!(["2.5"]));
    assert_eq!(response.body["sum"], "0");
}

#[rstest]
#[tokio::test]
async fn test_sum_is_a_string() {
    let response = post_json(create_test_router(), "/bfhl", &json!({ "data": [1, 2] })).await;
    assert_eq!(response.body["sum"], Value::String("3".to_string()));
}

#[rstest]
#[tokio::test]
async fn test_classify_uses_configured_identity() {
    let identity = IdentityConfig::new("P R Adithya", "31082004", "someone@example.com", "22BRS1100")
        .unwrap();
    let response = post_json(
        create_router_with(identity, common::TEST_BODY_LIMIT),
        "/bfhl",
        &json!({ "data": ["x"] }),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user_id"], "p_r_adithya_31082004");
    assert_eq!(response.body["email"], "someone@example.com");
    assert_eq!(response.body["roll_number"], "22BRS1100");
}

#[rstest]
#[tokio::test]
async fn test_classify_is_idempotent() {
    let body = json!({ "data": ["z", "7", "#", true, null, "Ab"] });
    let first = post_json(create_test_router(), "/bfhl", &body).await;
    let second = post_json(create_test_router(), "/bfhl", &body).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body, second.body);
}

// =============================================================================
// Rejected Requests
// =============================================================================

#[rstest]
#[case(json!({ "data": "not-an-array" }))]
#[case(json!({ "data": null }))]
#[case(json!({ "data": 12 }))]
#[case(json!({ "data": { "a": 1 } }))]
#[case(json!({ "other": [] }))]
#[case(json!({}))]
#[tokio::test]
async fn test_non_array_data_is_rejected(#[case] body: Value) {
    let response = post_json(create_test_router(), "/bfhl", &body).await;

    assert_error_envelope(&response, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["error"],
        "Invalid input: 'data' must be an array"
    );
}

#[rstest]
#[case("{ not json", Some("application/json"))]
#[case("\"just a string\"", Some("application/json"))]
#[case("{\"data\": []}", None)]
#[case("{\"data\": []}", Some("text/plain"))]
#[tokio::test]
async fn test_malformed_body_is_rejected(
    #[case] body: &'static str,
    #[case] content_type: Option<&'static str>,
) {
    let response = post_raw(create_test_router(), "/bfhl", body, content_type).await;

    assert_error_envelope(&response, StatusCode::BAD_REQUEST);
    assert!(
        response.body["error"]
            .as_str()
            .is_some_and(|message| message.starts_with("Invalid request body"))
    );
}

#[rstest]
#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let router = create_router_with(IdentityConfig::default(), 32);
    let body = json!({ "data": ["a".repeat(128)] });

    let response = post_json(router, "/bfhl", &body).await;

    assert_error_envelope(&response, StatusCode::PAYLOAD_TOO_LARGE);
}
