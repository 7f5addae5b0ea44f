use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use super::extractors::{ApiQuery, ValidatedJson};
use super::require_project;
use crate::error::Result;
use crate::models::activity;
use crate::schemas::{ActivityQuery, CreateActivityRequest};
use crate::state::AppState;

/// Create activity routes
pub fn activities_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_activities).post(create_activity))
        .with_state(state)
}

/// Recent activity across all projects, newest first
#[utoipa::path(
    get,
    path = "/api/activities",
    tag = "Activities",
    params(ActivityQuery),
    responses(
        (status = 200, body = Vec<activity::Model>)
    )
)]
pub async fn list_activities(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ActivityQuery>,
) -> Result<Json<Vec<activity::Model>>> {
    Ok(Json(
        state
            .storage
            .list_activities(query.effective_limit())
            .await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/activities",
    tag = "Activities",
    request_body = CreateActivityRequest,
    responses(
        (status = 201, body = activity::Model),
        (status = 400, description = "Validation error or unknown project")
    )
)]
pub async fn create_activity(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateActivityRequest>,
) -> Result<(StatusCode, Json<activity::Model>)> {
    if let Some(project_id) = req.project_id {
        require_project(&state, project_id).await?;
    }

    let activity = state.storage.create_activity(req.into()).await?;
    Ok((StatusCode::CREATED, Json(activity)))
}
