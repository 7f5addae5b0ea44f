use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::storage::{NewActivity, DEFAULT_ACTIVITY_LIMIT};

/// Largest page a client may ask for
pub const MAX_ACTIVITY_LIMIT: u64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub kind: String,
    #[validate(length(min = 1, max = 500, message = "must be 1-500 characters"))]
    pub description: String,
    #[serde(default)]
    pub project_id: Option<i64>,
}

impl From<CreateActivityRequest> for NewActivity {
    fn from(req: CreateActivityRequest) -> Self {
        Self {
            kind: req.kind.trim().to_lowercase(),
            description: req.description.trim().to_string(),
            project_id: req.project_id,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActivityQuery {
    /// Maximum number of entries, newest first (default 10, at most 100)
    pub limit: Option<u64>,
}

impl ActivityQuery {
    pub fn effective_limit(&self) -> u64 {
        self.limit
            .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
            .min(MAX_ACTIVITY_LIMIT)
    }
}
