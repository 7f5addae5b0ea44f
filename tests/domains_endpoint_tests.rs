//! Integration tests for the domains endpoints
//!
//! Covers endpoints under `/api/domains`:
//! - `GET    /api/domains`
//! - `POST   /api/domains`
//! - `GET    /api/domains/{id}`
//! - `PATCH  /api/domains/{id}`
//! - `DELETE /api/domains/{id}`

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{create_project, delete, get, patch, post, test_app, test_app_with_db};

async fn create_domain(app: &axum::Router, body: serde_json::Value) -> i64 {
    let (status, created) = post(app, "/api/domains", body).await;
    assert_eq!(status, StatusCode::CREATED, "create domain failed: {}", created);
    created["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_create_domain_pending() {
    let (app, _) = test_app();
    let project = create_project(&app, "Blog").await;

    let (status, body) = post(
        &app,
        "/api/domains",
        json!({"name": "blog.example.com", "projectId": project}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "blog.example.com");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["projectId"], project);
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_domain_normalises_name() {
    let (app, _) = test_app();

    let (status, body) = post(&app, "/api/domains", json!({"name": "  Blog.Example.COM "})).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "blog.example.com");
    assert!(body["projectId"].is_null());
}

#[tokio::test]
async fn test_create_domain_duplicate() {
    let (app, storage) = test_app();
    create_domain(&app, json!({"name": "blog.example.com"})).await;

    let (status, body) = post(&app, "/api/domains", json!({"name": "blog.example.com"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Domain already exists");
    assert_eq!(storage.list_domains().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_domain_unknown_project() {
    let (app, storage) = test_app();

    let (status, body) = post(
        &app,
        "/api/domains",
        json!({"name": "blog.example.com", "projectId": 404}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Project not found");
    assert!(storage.list_domains().await.unwrap().is_empty());
    assert!(storage.list_activities(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_domain_empty_name() {
    let (app, storage) = test_app();

    let (status, _) = post(&app, "/api/domains", json!({"name": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&app, "/api/domains", json!({"name": "   "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(storage.list_domains().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_and_get_domains() {
    let (app, _) = test_app();
    let first = create_domain(&app, json!({"name": "a.example.com"})).await;
    create_domain(&app, json!({"name": "b.example.com"})).await;

    let (status, body) = get(&app, "/api/domains").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["a.example.com", "b.example.com"]);

    let (status, body) = get(&app, &format!("/api/domains/{}", first)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "a.example.com");

    let (status, body) = get(&app, "/api/domains/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Domain not found");

    let (status, body) = get(&app, "/api/domains/x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid domain ID");
}

#[tokio::test]
async fn test_update_domain_status_and_project() {
    let (app, _) = test_app();
    let project = create_project(&app, "Blog").await;
    let id = create_domain(&app, json!({"name": "blog.example.com"})).await;

    let (status, body) = patch(
        &app,
        &format!("/api/domains/{}", id),
        json!({"status": "active", "projectId": project}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");
    assert_eq!(body["projectId"], project);
    assert_eq!(body["name"], "blog.example.com");

    let (status, body) = patch(&app, &format!("/api/domains/{}", id), json!({"projectId": null})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["projectId"].is_null());
    assert_eq!(body["status"], "active");
}

#[tokio::test]
async fn test_update_domain_rename_collision() {
    let (app, _) = test_app();
    let id = create_domain(&app, json!({"name": "a.example.com"})).await;
    create_domain(&app, json!({"name": "b.example.com"})).await;

    let (status, body) = patch(
        &app,
        &format!("/api/domains/{}", id),
        json!({"name": "b.example.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Domain already exists");

    // Keeping its own name is not a collision
    let (status, _) = patch(
        &app,
        &format!("/api/domains/{}", id),
        json!({"name": "a.example.com", "status": "error"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_domain_errors() {
    let (app, _) = test_app();
    let id = create_domain(&app, json!({"name": "a.example.com"})).await;

    let (status, body) = patch(&app, "/api/domains/500", json!({"status": "active"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Domain not found");

    let (status, body) = patch(&app, &format!("/api/domains/{}", id), json!({"projectId": 9})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Project not found");

    let (status, _) = patch(&app, &format!("/api/domains/{}", id), json!({"status": "verified"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = patch(&app, &format!("/api/domains/{}", id), json!({"name": "  "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = patch(&app, "/api/domains/500", json!({"status": "verified"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Domain not found");

    let (_, body) = get(&app, &format!("/api/domains/{}", id)).await;
    assert_eq!(body["name"], "a.example.com");
}

#[tokio::test]
async fn test_delete_domain() {
    let (app, _) = test_app();
    let project = create_project(&app, "Blog").await;
    let id = create_domain(&app, json!({"name": "blog.example.com", "projectId": project})).await;

    let (status, _) = delete(&app, &format!("/api/domains/{}", id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = delete(&app, &format!("/api/domains/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Domain not found");

    let (_, activities) = get(&app, &format!("/api/projects/{}/activities", project)).await;
    assert_eq!(activities[0]["description"], "Domain deleted - blog.example.com");
}

#[tokio::test]
async fn test_domain_lifecycle_with_database() {
    let (app, _) = test_app_with_db().await;
    let project = create_project(&app, "Blog").await;
    let id = create_domain(&app, json!({"name": "blog.example.com", "projectId": project})).await;

    let (status, body) = post(&app, "/api/domains", json!({"name": "blog.example.com"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Domain already exists");

    let (status, body) = patch(&app, &format!("/api/domains/{}", id), json!({"status": "active"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");

    let (status, _) = delete(&app, &format!("/api/projects/{}", project)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get(&app, &format!("/api/domains/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
