pub mod activities;
pub mod databases;
pub mod domains;
pub mod extractors;
pub mod projects;
pub mod system_metrics;

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::config::CONFIG;
use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(title = "Launchpad API", description = "Projects, domains and databases of a self-hosted deployment platform"),
    paths(
        projects::list_projects,
        projects::get_project,
        projects::create_project,
        projects::update_project,
        projects::delete_project,
        projects::list_project_activities,
        projects::list_project_domains,
        projects::list_project_databases,
        domains::list_domains,
        domains::get_domain,
        domains::create_domain,
        domains::update_domain,
        domains::delete_domain,
        databases::list_databases,
        databases::get_database,
        databases::create_database,
        databases::delete_database,
        activities::list_activities,
        activities::create_activity,
        system_metrics::latest_system_metric,
        system_metrics::record_system_metric,
    ),
    tags(
        (name = "Projects"),
        (name = "Domains"),
        (name = "Databases"),
        (name = "Activities"),
        (name = "System")
    )
)]
pub struct ApiDoc;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/system/version", get(get_version))
        .route("/api/openapi.json", get(openapi_json))
        .nest("/api", api_routes(state))
}

/// API routes under /api/*
fn api_routes(state: AppState) -> Router {
    Router::new()
        .nest("/projects", projects::projects_routes(state.clone()))
        .nest("/domains", domains::domains_routes(state.clone()))
        .nest("/databases", databases::databases_routes(state.clone()))
        .nest("/activities", activities::activities_routes(state.clone()))
        .nest(
            "/system-metrics",
            system_metrics::system_metrics_routes(state),
        )
}

/// 400 "Project not found" unless the referenced project exists
pub(crate) async fn require_project(state: &AppState, project_id: i64) -> Result<()> {
    match state.storage.get_project(project_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::BadRequest("Project not found".to_string())),
    }
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Version info endpoint
async fn get_version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "version": CONFIG.version,
        "commitHash": CONFIG.commit_hash,
        "buildTime": CONFIG.build_time,
        "storage": CONFIG
            .storage
            .backend()
            .map_or_else(|_| "unknown".to_string(), |b| b.to_string()),
        "backend": "rust"
    }))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
