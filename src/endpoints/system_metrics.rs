use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use super::extractors::ValidatedJson;
use crate::error::{AppError, Result};
use crate::models::system_metric;
use crate::schemas::CreateSystemMetricRequest;
use crate::state::AppState;

/// Create system metric routes
pub fn system_metrics_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(latest_system_metric).post(record_system_metric))
        .with_state(state)
}

/// Most recent host utilisation snapshot
#[utoipa::path(
    get,
    path = "/api/system-metrics",
    tag = "System",
    responses(
        (status = 200, body = system_metric::Model),
        (status = 404, description = "No system metrics found")
    )
)]
pub async fn latest_system_metric(
    State(state): State<AppState>,
) -> Result<Json<system_metric::Model>> {
    state
        .storage
        .latest_system_metric()
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No system metrics found".to_string()))
}

#[utoipa::path(
    post,
    path = "/api/system-metrics",
    tag = "System",
    request_body = CreateSystemMetricRequest,
    responses(
        (status = 201, body = system_metric::Model),
        (status = 400, description = "Validation error")
    )
)]
pub async fn record_system_metric(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateSystemMetricRequest>,
) -> Result<(StatusCode, Json<system_metric::Model>)> {
    let metric = state.storage.create_system_metric(req.into()).await?;
    Ok((StatusCode::CREATED, Json(metric)))
}
