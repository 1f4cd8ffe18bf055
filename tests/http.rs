//! Route-level tests driving the axum router directly, verifying the
//! status-code mapping of every operation.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use ticketd::{PathStore, RequestManager};

fn app() -> Router {
    let store = PathStore::new(Some(json!({
        "requests": [
            {
                "id": "123",
                "message": "I cannot access my training dashboard",
                "user": {
                    "fullName": "Victor Dupuy",
                    "email": "victor@example.com",
                    "age": 28,
                    "role": "dev",
                },
                "createdAt": 1_554_000_000_000_i64,
                "state": "pending",
            },
            {
                "id": "456",
                "message": "Please update my billing address",
                "user": {
                    "fullName": "Ada Fontaine",
                    "email": "ada@example.com",
                    "age": 35,
                    "role": "sales",
                },
                "createdAt": 1_554_000_100_000_i64,
                "state": "validated",
            },
        ]
    })))
    .expect("valid seed");

    ticketd::http::router(RequestManager::new(store))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn patch(uri: &str) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_check_is_ok() {
    let response = app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");
}

#[tokio::test]
async fn listing_by_state_returns_matching_requests() {
    let response = app().oneshot(get("/request/pending")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], json!("123"));
    assert_eq!(records[0]["state"], json!("pending"));
    assert_eq!(records[0]["user"]["fullName"], json!("Victor Dupuy"));
}

#[tokio::test]
async fn listing_with_invalid_state_is_bad_request() {
    let response = app().oneshot(get("/request/exploded")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn details_include_actions() {
    let response = app().oneshot(get("/request/action/456")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], json!("456"));
    assert_eq!(body["state"], json!("validated"));
    assert_eq!(body["actions"], json!(["archive", "invalidate", "delete"]));
}

#[tokio::test]
async fn details_of_unknown_id_is_not_found_with_message() {
    let response = app().oneshot(get("/request/action/dumbid")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "Request not found");
}

#[tokio::test]
async fn creating_a_request_returns_its_id() {
    let app = app();
    let payload = json!({
        "state": "pending",
        "message": "My badge no longer opens the office door",
        "user": {
            "fullName": "Jo March",
            "email": "jo@example.com",
            "age": 31,
            "role": "marketing",
        },
    });

    let response = app
        .clone()
        .oneshot(post_json("/request", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let id = body["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    // The new request is now listed under its state.
    let response = app.oneshot(get("/request/pending")).await.unwrap();
    let listed = body_json(response).await;
    assert!(listed
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["id"] == json!(id)));
}

#[tokio::test]
async fn creating_with_malformed_payload_is_bad_request() {
    let payload = json!({
        "state": "pending",
        "message": "",
        "user": {
            "fullName": "Jo March",
            "email": "jo@example.com",
            "age": 31,
            "role": "marketing",
        },
    });

    let response = app().oneshot(post_json("/request", &payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Data must be of expected format");
}

#[tokio::test]
async fn state_transitions_succeed_over_patch() {
    let app = app();

    let response = app
        .clone()
        .oneshot(patch("/request/validate/123"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true }));

    let response = app.oneshot(get("/request/action/123")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["state"], json!("validated"));
}

#[tokio::test]
async fn transition_of_unknown_id_is_not_found() {
    for uri in [
        "/request/validate/dumbid",
        "/request/invalidate/dumbid",
        "/request/archive/dumbid",
    ] {
        let response = app().oneshot(patch(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Request not found in database");
    }
}

#[tokio::test]
async fn deleting_a_request_removes_it() {
    let app = app();

    let response = app.clone().oneshot(delete("/request/123")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true }));

    let response = app.oneshot(get("/request/action/123")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_unknown_id_is_not_found() {
    let response = app().oneshot(delete("/request/doesnotexist")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "Request not found in database");
}
