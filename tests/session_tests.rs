//! Tests for the session header extractor and per-session state

use axum::Router;
use axum::body::Body;
use axum::extract::FromRequestParts;
use axum::http::{Request, StatusCode};
use di_axum::RouterServiceProviderExtensions;
use diamond_d_site::api::{self, ExtractSession};
use diamond_d_site::config::SiteConfig;
use diamond_d_site::core::replies::ReplyQueue;
use diamond_d_site::infrastructure::catalog::SiteCatalog;
use diamond_d_site::service_provider;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

fn create_test_app() -> Router {
    let config = SiteConfig::from_lookup(|_| None).unwrap();
    let (replies, _) = ReplyQueue::start();
    let provider =
        service_provider(config.clone(), SiteCatalog::embedded().unwrap(), replies).unwrap();

    api::router(&config).with_provider(provider)
}

async fn call(app: &Router, session: Uuid, method: &str, uri: &str, body: &str) -> Value {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("X-Session-ID", session.to_string())
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK, "{method} {uri}");
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_extract_session_valid_uuid() {
    let session_id = Uuid::new_v4();
    let req = Request::builder()
        .header("X-Session-ID", session_id.to_string())
        .body(())
        .unwrap();

    let (mut parts, _) = req.into_parts();
    let result = ExtractSession::from_request_parts(&mut parts, &()).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().0, session_id);
}

#[tokio::test]
async fn test_extract_session_missing_header() {
    let req = Request::builder().body(()).unwrap();

    let (mut parts, _) = req.into_parts();
    let result = ExtractSession::from_request_parts(&mut parts, &()).await;

    assert!(result.is_err());
    let (status, message) = result.unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message.contains("missing"));
}

#[tokio::test]
async fn test_extract_session_invalid_uuid() {
    let req = Request::builder()
        .header("X-Session-ID", "not-a-uuid")
        .body(())
        .unwrap();

    let (mut parts, _) = req.into_parts();
    let result = ExtractSession::from_request_parts(&mut parts, &()).await;

    assert!(result.is_err());
    let (status, message) = result.unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message.contains("invalid"));
}

#[tokio::test]
async fn test_extract_session_invalid_utf8() {
    use axum::http::HeaderValue;

    let mut req = Request::builder().body(()).unwrap();
    req.headers_mut()
        .insert("X-Session-ID", HeaderValue::from_bytes(&[0xFF, 0xFE]).unwrap());

    let (mut parts, _) = req.into_parts();
    let result = ExtractSession::from_request_parts(&mut parts, &()).await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().0, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_session_id_starts_fresh() {
    let app = create_test_app();
    let session = Uuid::new_v4();

    let active = call(&app, session, "GET", "/locations/active", "").await;
    assert_eq!(active["id"], "gilmer");

    let chat = call(&app, session, "GET", "/chat", "").await;
    assert_eq!(chat["open"], false);
    let messages = chat["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["is_bot"], true);

    let modal = call(&app, session, "GET", "/site/modal", "").await;
    assert_eq!(modal["open"], false);
}

#[tokio::test]
async fn test_session_state_is_kept_per_id() {
    let app = create_test_app();
    let (first, second) = (Uuid::new_v4(), Uuid::new_v4());

    call(&app, first, "POST", "/locations/active", r#"{"id":"longview"}"#).await;
    call(&app, first, "POST", "/site/modal", r#"{"open":true}"#).await;

    let active = call(&app, first, "GET", "/locations/active", "").await;
    assert_eq!(active["id"], "longview");
    assert_eq!(call(&app, first, "GET", "/site/modal", "").await["open"], true);

    let active = call(&app, second, "GET", "/locations/active", "").await;
    assert_eq!(active["id"], "gilmer");
    assert_eq!(call(&app, second, "GET", "/site/modal", "").await["open"], false);
}
