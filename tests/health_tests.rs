//! Tests for the unauthenticated system routes and response headers

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use tower::ServiceExt;

mod common;
use common::{get, test_app};

#[tokio::test]
async fn test_health_check() {
    let (app, _) = test_app();

    let (status, body) = get(&app, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_version_endpoint() {
    let (app, _) = test_app();

    let (status, body) = get(&app, "/api/system/version").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["backend"], "rust");
    assert!(body["storage"].is_string());
}

#[tokio::test]
async fn test_openapi_document_lists_paths() {
    let (app, _) = test_app();

    let (status, body) = get(&app, "/api/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().unwrap();
    for path in [
        "/api/projects",
        "/api/projects/{id}",
        "/api/projects/{id}/activities",
        "/api/domains",
        "/api/domains/{id}",
        "/api/databases",
        "/api/activities",
        "/api/system-metrics",
    ] {
        assert!(paths.contains_key(path), "missing {}", path);
    }

    let schemas = body["components"]["schemas"].as_object().unwrap();
    assert!(schemas.contains_key("Project"));
    assert!(schemas.contains_key("Domain"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (app, _) = test_app();

    let (status, _) = get(&app, "/api/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_security_headers_on_api_responses() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/projects")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "no-store");
    assert!(headers.contains_key(header::CONTENT_SECURITY_POLICY));
}

#[tokio::test]
async fn test_security_headers_on_errors() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/projects/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
}

#[tokio::test]
async fn test_cors_preflight_allowed_by_default() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/projects")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
