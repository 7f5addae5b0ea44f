use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use super::extractors::{parse_id, ValidatedJson};
use super::require_project;
use crate::error::{AppError, Result};
use crate::models::database as managed_database;
use crate::schemas::CreateDatabaseRequest;
use crate::services::provisioning;
use crate::state::AppState;
use crate::storage::NewDatabase;

/// Create database routes
pub fn databases_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_databases).post(create_database))
        .route("/{id}", get(get_database).delete(delete_database))
        .with_state(state)
}

fn not_found() -> AppError {
    AppError::NotFound("Database not found".to_string())
}

#[utoipa::path(
    get,
    path = "/api/databases",
    tag = "Databases",
    responses(
        (status = 200, body = Vec<managed_database::Model>)
    )
)]
pub async fn list_databases(
    State(state): State<AppState>,
) -> Result<Json<Vec<managed_database::Model>>> {
    Ok(Json(state.storage.list_databases().await?))
}

#[utoipa::path(
    get,
    path = "/api/databases/{id}",
    tag = "Databases",
    params(("id" = i64, Path, description = "Database ID")),
    responses(
        (status = 200, body = managed_database::Model),
        (status = 404, description = "Database not found")
    )
)]
pub async fn get_database(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<managed_database::Model>> {
    let id = parse_id(&id, "database")?;
    let database = state.storage.get_database(id).await?.ok_or_else(not_found)?;
    Ok(Json(database))
}

/// Create a managed database, generating a connection string when none is supplied
#[utoipa::path(
    post,
    path = "/api/databases",
    tag = "Databases",
    request_body = CreateDatabaseRequest,
    responses(
        (status = 201, body = managed_database::Model),
        (status = 400, description = "Validation error, unknown project or duplicate name")
    )
)]
pub async fn create_database(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateDatabaseRequest>,
) -> Result<(StatusCode, Json<managed_database::Model>)> {
    let name = req.name.clone();

    if let Some(project_id) = req.project_id {
        require_project(&state, project_id).await?;
    }
    if state.storage.get_database_by_name(&name).await?.is_some() {
        return Err(AppError::BadRequest(
            "Database with this name already exists".to_string(),
        ));
    }

    let db_type = req.db_type.clone();
    let connection_string = req
        .supplied_connection_string()
        .unwrap_or_else(|| provisioning::connection_string(&db_type, &name));

    let database = state
        .storage
        .create_database(NewDatabase {
            name,
            db_type,
            project_id: req.project_id,
            connection_string,
        })
        .await?;

    tracing::info!(database_id = database.id, name = %database.name, "Database created");
    Ok((StatusCode::CREATED, Json(database)))
}

#[utoipa::path(
    delete,
    path = "/api/databases/{id}",
    tag = "Databases",
    params(("id" = i64, Path, description = "Database ID")),
    responses(
        (status = 204, description = "Database deleted"),
        (status = 404, description = "Database not found")
    )
)]
pub async fn delete_database(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id, "database")?;
    if !state.storage.delete_database(id).await? {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}
