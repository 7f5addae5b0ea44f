use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{double_option, non_blank, trimmed, trimmed_option};
use crate::error::{AppError, Result};
use crate::models::project::ProjectStatus;
use crate::storage::{NewProject, ProjectPatch};

fn default_branch() -> String {
    "main".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub name: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub framework: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(url(message = "must be a valid URL"))]
    pub repository_url: String,
    #[serde(default = "default_branch", deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub branch: String,
    #[serde(default)]
    #[validate(length(max = 253, message = "must be at most 253 characters"))]
    pub domain: Option<String>,
}

impl From<CreateProjectRequest> for NewProject {
    fn from(req: CreateProjectRequest) -> Self {
        Self {
            name: req.name,
            framework: req.framework,
            repository_url: req.repository_url,
            branch: req.branch,
            domain: non_blank(req.domain),
        }
    }
}

/// Partial project update. `"domain": null` clears the domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[serde(default, deserialize_with = "trimmed_option")]
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "trimmed_option")]
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub framework: Option<String>,
    #[serde(default, deserialize_with = "trimmed_option")]
    #[validate(url(message = "must be a valid URL"))]
    pub repository_url: Option<String>,
    #[serde(default, deserialize_with = "trimmed_option")]
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub branch: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub domain: Option<Option<String>>,
    pub status: Option<ProjectStatus>,
}

impl UpdateProjectRequest {
    /// Field checks `validator` cannot express on a nested option
    pub fn check_domain(&self) -> Result<()> {
        match &self.domain {
            Some(Some(domain)) if domain.len() > 253 => Err(AppError::BadRequest(
                "Validation error: domain: must be at most 253 characters".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl From<UpdateProjectRequest> for ProjectPatch {
    fn from(req: UpdateProjectRequest) -> Self {
        Self {
            name: req.name,
            framework: req.framework,
            repository_url: req.repository_url,
            branch: req.branch,
            domain: req.domain.map(non_blank),
            status: req.status,
        }
    }
}
