use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use super::extractors::{parse_id, ApiQuery, ValidatedJson};
use crate::error::{AppError, Result};
use crate::models::{activity, database as managed_database, domain, project};
use crate::schemas::{ActivityQuery, CreateProjectRequest, UpdateProjectRequest};
use crate::state::AppState;

/// Create project routes
pub fn projects_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route(
            "/{id}",
            get(get_project).patch(update_project).delete(delete_project),
        )
        .route("/{id}/activities", get(list_project_activities))
        .route("/{id}/domains", get(list_project_domains))
        .route("/{id}/databases", get(list_project_databases))
        .with_state(state)
}

async fn find_project(state: &AppState, raw_id: &str) -> Result<project::Model> {
    let id = parse_id(raw_id, "project")?;
    state
        .storage
        .get_project(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
}

/// List projects, most recently updated first
#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "Projects",
    responses(
        (status = 200, body = Vec<project::Model>)
    )
)]
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<project::Model>>> {
    Ok(Json(state.storage.list_projects().await?))
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    tag = "Projects",
    params(("id" = i64, Path, description = "Project ID")),
    responses(
        (status = 200, body = project::Model),
        (status = 400, description = "Invalid project ID"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<project::Model>> {
    Ok(Json(find_project(&state, &id).await?))
}

#[utoipa::path(
    post,
    path = "/api/projects",
    tag = "Projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, body = project::Model),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_project(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateProjectRequest>,
) -> Result<(StatusCode, Json<project::Model>)> {
    let project = state.storage.create_project(req.into()).await?;
    tracing::info!(project_id = project.id, name = %project.name, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

#[utoipa::path(
    patch,
    path = "/api/projects/{id}",
    tag = "Projects",
    params(("id" = i64, Path, description = "Project ID")),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, body = project::Model),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<ValidatedJson<UpdateProjectRequest>>,
) -> Result<Json<project::Model>> {
    // A missing project wins over a bad body
    let existing = find_project(&state, &id).await?;
    let ValidatedJson(req) = body?;
    req.check_domain()?;

    let updated = state
        .storage
        .update_project(existing.id, req.into())
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
    Ok(Json(updated))
}

/// Delete a project together with its domains and databases
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    tag = "Projects",
    params(("id" = i64, Path, description = "Project ID")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id, "project")?;
    if !state.storage.delete_project(id).await? {
        return Err(AppError::NotFound("Project not found".to_string()));
    }

    tracing::info!(project_id = id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}/activities",
    tag = "Projects",
    params(("id" = i64, Path, description = "Project ID"), ActivityQuery),
    responses(
        (status = 200, body = Vec<activity::Model>),
        (status = 404, description = "Project not found")
    )
)]
pub async fn list_project_activities(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<ActivityQuery>,
) -> Result<Json<Vec<activity::Model>>> {
    let project = find_project(&state, &id).await?;
    let activities = state
        .storage
        .list_project_activities(project.id, query.effective_limit())
        .await?;
    Ok(Json(activities))
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}/domains",
    tag = "Projects",
    params(("id" = i64, Path, description = "Project ID")),
    responses(
        (status = 200, body = Vec<domain::Model>),
        (status = 404, description = "Project not found")
    )
)]
pub async fn list_project_domains(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<domain::Model>>> {
    let project = find_project(&state, &id).await?;
    Ok(Json(state.storage.list_domains_for_project(project.id).await?))
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}/databases",
    tag = "Projects",
    params(("id" = i64, Path, description = "Project ID")),
    responses(
        (status = 200, body = Vec<managed_database::Model>),
        (status = 404, description = "Project not found")
    )
)]
pub async fn list_project_databases(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<managed_database::Model>>> {
    let project = find_project(&state, &id).await?;
    Ok(Json(
        state.storage.list_databases_for_project(project.id).await?,
    ))
}
