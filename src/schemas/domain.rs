use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{double_option, trimmed, trimmed_option};
use crate::models::domain::DomainStatus;
use crate::storage::{DomainPatch, NewDomain};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDomainRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 253, message = "must be 1-253 characters"))]
    pub name: String,
    #[serde(default)]
    pub project_id: Option<i64>,
}

impl From<CreateDomainRequest> for NewDomain {
    fn from(req: CreateDomainRequest) -> Self {
        Self {
            name: req.name.to_lowercase(),
            project_id: req.project_id,
        }
    }
}

/// Partial domain update. `"projectId": null` detaches the domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDomainRequest {
    #[serde(default, deserialize_with = "trimmed_option")]
    #[validate(length(min = 1, max = 253, message = "must be 1-253 characters"))]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<i64>)]
    pub project_id: Option<Option<i64>>,
    pub status: Option<DomainStatus>,
}

impl UpdateDomainRequest {
    /// Project the domain is being attached to, if any
    pub fn target_project(&self) -> Option<i64> {
        self.project_id.flatten()
    }
}

impl From<UpdateDomainRequest> for DomainPatch {
    fn from(req: UpdateDomainRequest) -> Self {
        Self {
            name: req.name.map(|v| v.to_lowercase()),
            project_id: req.project_id,
            status: req.status,
        }
    }
}
