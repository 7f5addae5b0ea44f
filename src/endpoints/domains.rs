use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use super::extractors::{parse_id, ValidatedJson};
use super::require_project;
use crate::error::{AppError, Result};
use crate::models::domain;
use crate::schemas::{CreateDomainRequest, UpdateDomainRequest};
use crate::state::AppState;
use crate::storage::{DomainPatch, NewDomain};

/// Create domain routes
pub fn domains_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_domains).post(create_domain))
        .route(
            "/{id}",
            get(get_domain).patch(update_domain).delete(delete_domain),
        )
        .with_state(state)
}

fn not_found() -> AppError {
    AppError::NotFound("Domain not found".to_string())
}

#[utoipa::path(
    get,
    path = "/api/domains",
    tag = "Domains",
    responses(
        (status = 200, body = Vec<domain::Model>)
    )
)]
pub async fn list_domains(State(state): State<AppState>) -> Result<Json<Vec<domain::Model>>> {
    Ok(Json(state.storage.list_domains().await?))
}

#[utoipa::path(
    get,
    path = "/api/domains/{id}",
    tag = "Domains",
    params(("id" = i64, Path, description = "Domain ID")),
    responses(
        (status = 200, body = domain::Model),
        (status = 404, description = "Domain not found")
    )
)]
pub async fn get_domain(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<domain::Model>> {
    let id = parse_id(&id, "domain")?;
    let domain = state.storage.get_domain(id).await?.ok_or_else(not_found)?;
    Ok(Json(domain))
}

/// Register a domain. The name must be unused and the project, if given, must exist.
#[utoipa::path(
    post,
    path = "/api/domains",
    tag = "Domains",
    request_body = CreateDomainRequest,
    responses(
        (status = 201, body = domain::Model),
        (status = 400, description = "Validation error, unknown project or duplicate name")
    )
)]
pub async fn create_domain(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateDomainRequest>,
) -> Result<(StatusCode, Json<domain::Model>)> {
    let input = NewDomain::from(req);

    if let Some(project_id) = input.project_id {
        require_project(&state, project_id).await?;
    }
    if state.storage.get_domain_by_name(&input.name).await?.is_some() {
        return Err(AppError::BadRequest("Domain already exists".to_string()));
    }

    let domain = state.storage.create_domain(input).await?;
    tracing::info!(domain_id = domain.id, name = %domain.name, "Domain created");
    Ok((StatusCode::CREATED, Json(domain)))
}

#[utoipa::path(
    patch,
    path = "/api/domains/{id}",
    tag = "Domains",
    params(("id" = i64, Path, description = "Domain ID")),
    request_body = UpdateDomainRequest,
    responses(
        (status = 200, body = domain::Model),
        (status = 400, description = "Validation error, unknown project or duplicate name"),
        (status = 404, description = "Domain not found")
    )
)]
pub async fn update_domain(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<ValidatedJson<UpdateDomainRequest>>,
) -> Result<Json<domain::Model>> {
    let id = parse_id(&id, "domain")?;
    let existing = state.storage.get_domain(id).await?.ok_or_else(not_found)?;
    let ValidatedJson(req) = body?;

    if let Some(project_id) = req.target_project() {
        require_project(&state, project_id).await?;
    }

    let patch = DomainPatch::from(req);
    if let Some(name) = patch.name.as_deref().filter(|name| *name != existing.name) {
        if state.storage.get_domain_by_name(name).await?.is_some() {
            return Err(AppError::BadRequest("Domain already exists".to_string()));
        }
    }

    let updated = state
        .storage
        .update_domain(id, patch)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/domains/{id}",
    tag = "Domains",
    params(("id" = i64, Path, description = "Domain ID")),
    responses(
        (status = 204, description = "Domain deleted"),
        (status = 404, description = "Domain not found")
    )
)]
pub async fn delete_domain(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id, "domain")?;
    if !state.storage.delete_domain(id).await? {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}
