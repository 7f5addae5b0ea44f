use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Deployment state of a project
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    #[sea_orm(string_value = "idle")]
    Idle,
    #[sea_orm(string_value = "building")]
    Building,
    #[sea_orm(string_value = "live")]
    Live,
    #[sea_orm(string_value = "error")]
    Error,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Idle => write!(f, "idle"),
            ProjectStatus::Building => write!(f, "building"),
            ProjectStatus::Live => write!(f, "live"),
            ProjectStatus::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(ProjectStatus::Idle),
            "building" => Ok(ProjectStatus::Building),
            "live" => Ok(ProjectStatus::Live),
            "error" => Ok(ProjectStatus::Error),
            other => Err(format!("Unknown project status: {}", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, utoipa::ToSchema)]
#[sea_orm(table_name = "projects")]
#[schema(as = Project)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub framework: String,
    pub repository_url: String,
    pub branch: String,
    pub domain: Option<String>,
    pub status: ProjectStatus,
    #[schema(value_type = String)]
    pub created_at: DateTimeUtc,
    #[schema(value_type = String)]
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::domain::Entity")]
    Domains,
    #[sea_orm(has_many = "super::database::Entity")]
    Databases,
}

impl Related<super::domain::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Domains.def()
    }
}

impl Related<super::database::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Databases.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
