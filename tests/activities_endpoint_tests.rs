//! Integration tests for `/api/activities` and `/api/system-metrics`

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{create_project, get, post, test_app, test_app_with_db};

// ============================================================================
// Activities
// ============================================================================

#[tokio::test]
async fn test_create_activity() {
    let (app, _) = test_app();
    let project = create_project(&app, "Blog").await;

    let (status, body) = post(
        &app,
        "/api/activities",
        json!({"type": "Deployment", "description": "Deployed main", "projectId": project}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["type"], "deployment");
    assert_eq!(body["description"], "Deployed main");
    assert_eq!(body["projectId"], project);
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_activity_validation() {
    let (app, _) = test_app();

    let (status, _) = post(&app, "/api/activities", json!({"type": "build", "description": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post(
        &app,
        "/api/activities",
        json!({"type": "build", "description": "Built", "projectId": 3}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Project not found");
}

#[tokio::test]
async fn test_list_activities_default_and_limit() {
    let (app, _) = test_app();
    for i in 0..12 {
        post(
            &app,
            "/api/activities",
            json!({"type": "build", "description": format!("Build {}", i)}),
        )
        .await;
    }

    let (status, body) = get(&app, "/api/activities").await;
    assert_eq!(status, StatusCode::OK);
    let all = body.as_array().unwrap();
    assert_eq!(all.len(), 10);
    assert_eq!(all[0]["description"], "Build 11");

    let (_, body) = get(&app, "/api/activities?limit=3").await;
    let descriptions: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["description"].as_str().unwrap())
        .collect();
    assert_eq!(descriptions, vec!["Build 11", "Build 10", "Build 9"]);

    let (_, body) = get(&app, "/api/activities?limit=500").await;
    assert_eq!(body.as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn test_list_activities_bad_limit() {
    let (app, _) = test_app();

    let (status, body) = get(&app, "/api/activities?limit=lots").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_activities_with_database_backend() {
    let (app, _) = test_app_with_db().await;
    let project = create_project(&app, "Blog").await;
    post(
        &app,
        "/api/activities",
        json!({"type": "build", "description": "Built main", "projectId": project}),
    )
    .await;

    let (status, body) = get(&app, "/api/activities?limit=2").await;

    assert_eq!(status, StatusCode::OK);
    let descriptions: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["description"].as_str().unwrap())
        .collect();
    assert_eq!(descriptions, vec!["Built main", "Project created - Blog"]);
}

// ============================================================================
// System metrics
// ============================================================================

#[tokio::test]
async fn test_latest_metric_empty() {
    let (app, _) = test_app();

    let (status, body) = get(&app, "/api/system-metrics").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No system metrics found");
}

#[tokio::test]
async fn test_record_and_read_metric() {
    let (app, _) = test_app();

    let (status, _) = post(
        &app,
        "/api/system-metrics",
        json!({"cpuUsage": 10, "memoryUsage": 20, "diskUsage": 30, "networkUsage": 40}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, created) = post(
        &app,
        "/api/system-metrics",
        json!({"cpuUsage": 23, "memoryUsage": 42, "diskUsage": 38, "networkUsage": 246}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = get(&app, "/api/system-metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);
    assert_eq!(body["cpuUsage"], 23);
    assert_eq!(body["networkUsage"], 246);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_record_metric_out_of_range() {
    let (app, storage) = test_app();

    let (status, body) = post(
        &app,
        "/api/system-metrics",
        json!({"cpuUsage": 120, "memoryUsage": 20, "diskUsage": 30, "networkUsage": 40}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("cpu"));
    assert!(storage.latest_system_metric().await.unwrap().is_none());
}
