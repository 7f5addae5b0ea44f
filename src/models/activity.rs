use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, utoipa::ToSchema)]
#[sea_orm(table_name = "activities")]
#[schema(as = Activity)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    /// Attribution only; the project may since have been deleted
    pub project_id: Option<i64>,
    #[schema(value_type = String)]
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Activity kinds recorded by the store itself. Clients may post others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Deployment,
    Build,
    Project,
    Domain,
    Database,
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityKind::Deployment => write!(f, "deployment"),
            ActivityKind::Build => write!(f, "build"),
            ActivityKind::Project => write!(f, "project"),
            ActivityKind::Domain => write!(f, "domain"),
            ActivityKind::Database => write!(f, "database"),
        }
    }
}
