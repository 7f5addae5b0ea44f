use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::storage::NewSystemMetric;

/// Utilisation percentages plus network throughput
#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSystemMetricRequest {
    #[validate(range(min = 0, max = 100, message = "must be between 0 and 100"))]
    pub cpu_usage: i32,
    #[validate(range(min = 0, max = 100, message = "must be between 0 and 100"))]
    pub memory_usage: i32,
    #[validate(range(min = 0, max = 100, message = "must be between 0 and 100"))]
    pub disk_usage: i32,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub network_usage: i32,
}

impl From<CreateSystemMetricRequest> for NewSystemMetric {
    fn from(req: CreateSystemMetricRequest) -> Self {
        Self {
            cpu_usage: req.cpu_usage,
            memory_usage: req.memory_usage,
            disk_usage: req.disk_usage,
            network_usage: req.network_usage,
        }
    }
}
