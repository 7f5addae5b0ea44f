//! Test helpers and utilities for integration testing.
//!
//! Provides both storage backends, a router over each, and small request
//! helpers for driving the router with `oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt;

use launchpad::bootstrapper::create_app;
use launchpad::migrations::Migrator;
use launchpad::state::AppState;
use launchpad::storage::{DatabaseStorage, MemoryStorage, NewProject, Storage};

/// Create an in-memory SQLite database for testing
pub async fn create_test_db() -> DatabaseConnection {
    // Use simple in-memory SQLite - each connection gets its own database
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run test migrations");

    db
}

pub fn memory_storage() -> Arc<dyn Storage> {
    Arc::new(MemoryStorage::new())
}

pub async fn database_storage() -> Arc<dyn Storage> {
    Arc::new(DatabaseStorage::new(create_test_db().await))
}

/// Full application router (middleware included) over the in-memory store
pub fn test_app() -> (Router, Arc<dyn Storage>) {
    let storage = memory_storage();
    let app = create_app(AppState::new(storage.clone()), &[]);
    (app, storage)
}

/// Full application router over a fresh SQLite database
pub async fn test_app_with_db() -> (Router, Arc<dyn Storage>) {
    let storage = database_storage().await;
    let app = create_app(AppState::new(storage.clone()), &[]);
    (app, storage)
}

pub fn project_input(name: &str) -> NewProject {
    NewProject {
        name: name.to_string(),
        framework: "React".to_string(),
        repository_url: format!("https://github.com/acme/{}", name.to_lowercase()),
        branch: "main".to_string(),
        domain: None,
    }
}

/// Send a request and return status plus parsed JSON body (`Value::Null` when empty)
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).to_string())
        })
    };

    (status, value)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body)).await
}

pub async fn patch(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "PATCH", uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "DELETE", uri, None).await
}

/// POST /api/projects and return the new project's id
pub async fn create_project(app: &Router, name: &str) -> i64 {
    let (status, body) = post(
        app,
        "/api/projects",
        serde_json::json!({
            "name": name,
            "framework": "React",
            "repositoryUrl": format!("https://github.com/acme/{}", name.to_lowercase()),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create project failed: {}", body);
    body["id"].as_i64().unwrap()
}
