//! REST handler tests
//!
//! Drive the router with in-process requests and check the status mapping
//! and bodies against the documented contract.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use keyport_keys::{KeyRecord, Keybase, MemoryKeybase, Secp256k1SecretKey};
use keyport_rest::{router, AppState};
use tower::ServiceExt;

fn seeded_state() -> Arc<AppState> {
    let mut kb = MemoryKeybase::new();
    let secret = Secp256k1SecretKey::generate(&mut rand::thread_rng());
    let record = KeyRecord::new_local("alice", secret.public_key());
    kb.create(&record, Some(&secret), Some("test1234")).unwrap();
    Arc::new(AppState::new(Box::new(kb)))
}

fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_delete_success() {
    let state = seeded_state();
    let app = router(state.clone());

    let response = app
        .oneshot(json_request(
            Method::DELETE,
            "/keys/alice",
            r#"{"password":"test1234"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!state.keybase.lock().exists("alice"));
}

#[tokio::test]
async fn test_delete_unknown_key_is_404() {
    let app = router(seeded_state());

    let response = app
        .oneshot(json_request(
            Method::DELETE,
            "/keys/bob",
            r#"{"password":"test1234"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "Key bob not found");
}

#[tokio::test]
async fn test_delete_wrong_password_is_401() {
    let state = seeded_state();
    let app = router(state.clone());

    let response = app
        .oneshot(json_request(
            Method::DELETE,
            "/keys/alice",
            r#"{"password":"wrong"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_text(response).await, "invalid account password");
    assert!(state.keybase.lock().exists("alice"));
}

#[tokio::test]
async fn test_delete_malformed_body_is_400() {
    let app = router(seeded_state());

    let response = app
        .oneshot(json_request(Method::DELETE, "/keys/alice", "{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_success_sets_json_content_type() {
    let state = seeded_state();
    let app = router(state.clone());

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/keys/alice",
            r#"{"new_password":"next5678","old_password":"test1234"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );

    // The new password now verifies, the old one does not.
    let mut kb = state.keybase.lock();
    assert!(kb.delete("alice", "test1234", false).is_err());
    kb.delete("alice", "next5678", false).unwrap();
}

#[tokio::test]
async fn test_update_unknown_key_is_404() {
    let app = router(seeded_state());

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/keys/bob",
            r#"{"new_password":"next5678","old_password":"test1234"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_wrong_password_is_401() {
    let app = router(seeded_state());

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/keys/alice",
            r#"{"new_password":"next5678","old_password":"wrong"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_missing_field_is_400() {
    let app = router(seeded_state());

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/keys/alice",
            r#"{"new_password":"next5678"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
