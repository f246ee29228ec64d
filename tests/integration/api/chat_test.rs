//! Router-level tests for the chat REST surface
//!
//! These run against the full router without a database: they pin down
//! the principal middleware, input validation at the boundary, and the
//! 503 answer of persistence-backed routes when no store is configured.

use axum::http::{HeaderName, HeaderValue, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::{principal_header, test_server, test_state};

#[tokio::test]
async fn test_health_route_needs_no_principal() {
    let server = test_server(test_state());

    let response = server.get("/").await;
    response.assert_status_ok();
    assert!(response.text().contains("talkwire"));
}

#[tokio::test]
async fn test_missing_principal_is_unauthorized() {
    let server = test_server(test_state());
    let user = Uuid::new_v4();

    let response = server.get(&format!("/conversations/for/{}", user)).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_principal_is_unauthorized() {
    let server = test_server(test_state());
    let user = Uuid::new_v4();

    let response = server
        .get(&format!("/conversations/for/{}", user))
        .add_header(
            HeaderName::from_static("x-user-id"),
            HeaderValue::from_static("not-a-uuid"),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_listing_without_store_is_service_unavailable() {
    let server = test_server(test_state());
    let user = Uuid::new_v4();
    let (name, value) = principal_header(user);

    let response = server
        .get(&format!("/conversations/for/{}", user))
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_create_conversation_rejects_single_participant() {
    let server = test_server(test_state());
    let user = Uuid::new_v4();
    let (name, value) = principal_header(user);

    // Same id on both sides fails validation before the store is touched,
    // so this holds even without a database.
    let response = server
        .post("/conversations")
        .add_header(name, value)
        .json(&json!({
            "participantAId": user,
            "participantBId": user,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("participants"));
}

#[tokio::test]
async fn test_create_conversation_rejects_missing_participant() {
    let server = test_server(test_state());
    let user = Uuid::new_v4();
    let (name, value) = principal_header(user);

    let response = server
        .post("/conversations")
        .add_header(name, value)
        .json(&json!({ "participantAId": user }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_legacy_create_body_is_accepted_as_far_as_the_store() {
    let server = test_server(test_state());
    let user = Uuid::new_v4();
    let (name, value) = principal_header(user);

    // The legacy senderId/receiverId spelling passes boundary validation;
    // without a store configured the request then answers 503, not 400.
    let response = server
        .post("/conversations")
        .add_header(name, value)
        .json(&json!({
            "senderId": user,
            "receiverId": Uuid::new_v4(),
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_send_message_rejects_empty_content_before_store() {
    let server = test_server(test_state());
    let user = Uuid::new_v4();
    let (name, value) = principal_header(user);

    // Content validation runs before the pool check: empty content is 400
    // even when no database is configured.
    let response = server
        .post("/messages")
        .add_header(name, value)
        .json(&json!({
            "conversationId": Uuid::new_v4(),
            "senderId": user,
            "content": "   ",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let server = test_server(test_state());

    let response = server.get("/nope").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
