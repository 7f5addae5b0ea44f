use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{non_blank, trimmed};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDatabaseRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 63, message = "must be 1-63 characters"))]
    pub name: String,
    /// Engine name, e.g. "PostgreSQL"
    #[serde(rename = "type", deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub db_type: String,
    #[serde(default)]
    pub project_id: Option<i64>,
    /// Generated when omitted
    #[serde(default)]
    #[validate(length(max = 2048, message = "must be at most 2048 characters"))]
    pub connection_string: Option<String>,
}

impl CreateDatabaseRequest {
    pub fn supplied_connection_string(&self) -> Option<String> {
        non_blank(self.connection_string.clone())
    }
}
