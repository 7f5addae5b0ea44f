//! Entity storage and cascade-consistency layer.
//!
//! Every collection (users, projects, domains, databases, activities,
//! system metrics) is reached through the [`Storage`] trait. Two
//! implementations exist: [`MemoryStorage`] for tests and throwaway
//! instances, and [`DatabaseStorage`] backed by sea-orm.
//!
//! Each trait call is one unit of work. Creating a project, domain or
//! database appends its activity in the same unit; deleting a project
//! removes its domains and databases, appends an unattributed activity and
//! removes the project without any other caller observing a partial state.
//!
//! Absent records are `Ok(None)` / `Ok(false)`, never errors. Duplicate
//! names (domains, databases) and usernames are rejected with
//! `AppError::Conflict`. Whether a referenced project exists is the
//! caller's concern.

pub mod database;
pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::activity::ActivityKind;
use crate::models::project::ProjectStatus;
use crate::models::domain::DomainStatus;
use crate::models::{activity, database as managed_database, domain, project, system_metric, user};

pub use database::DatabaseStorage;
pub use memory::MemoryStorage;

/// Number of activities returned when the caller gives no limit
pub const DEFAULT_ACTIVITY_LIMIT: u64 = 10;

// ============================================================================
// Store inputs
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    /// Already hashed, see `services::security::hash_password`
    pub password: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub framework: String,
    pub repository_url: String,
    pub branch: String,
    pub domain: Option<String>,
}

/// Field-level merge for a project. `None` leaves a field untouched;
/// `domain: Some(None)` clears the domain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub framework: Option<String>,
    pub repository_url: Option<String>,
    pub branch: Option<String>,
    pub domain: Option<Option<String>>,
    pub status: Option<ProjectStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDomain {
    pub name: String,
    pub project_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainPatch {
    pub name: Option<String>,
    pub project_id: Option<Option<i64>>,
    pub status: Option<DomainStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDatabase {
    pub name: String,
    pub db_type: String,
    pub project_id: Option<i64>,
    pub connection_string: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub kind: String,
    pub description: String,
    pub project_id: Option<i64>,
}

impl NewActivity {
    pub fn new(kind: ActivityKind, description: impl Into<String>, project_id: Option<i64>) -> Self {
        Self {
            kind: kind.to_string(),
            description: description.into(),
            project_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewSystemMetric {
    pub cpu_usage: i32,
    pub memory_usage: i32,
    pub disk_usage: i32,
    pub network_usage: i32,
}

/// Audit line the store appends for its own mutations, e.g. "Domain deleted - api.example.com"
pub(crate) fn describe(kind: ActivityKind, verb: &str, name: &str) -> String {
    let noun = match kind {
        ActivityKind::Project => "Project",
        ActivityKind::Domain => "Domain",
        ActivityKind::Database => "Database",
        ActivityKind::Deployment => "Deployment",
        ActivityKind::Build => "Build",
    };
    format!("{} {} - {}", noun, verb, name)
}

// ============================================================================
// Storage trait
// ============================================================================

#[async_trait]
pub trait Storage: Send + Sync {
    // Users
    async fn get_user(&self, id: i64) -> Result<Option<user::Model>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<user::Model>>;
    async fn create_user(&self, input: NewUser) -> Result<user::Model>;

    // Projects
    /// Most recently updated first
    async fn list_projects(&self) -> Result<Vec<project::Model>>;
    async fn get_project(&self, id: i64) -> Result<Option<project::Model>>;
    async fn create_project(&self, input: NewProject) -> Result<project::Model>;
    async fn update_project(&self, id: i64, patch: ProjectPatch) -> Result<Option<project::Model>>;
    /// Cascades to the project's domains and databases
    async fn delete_project(&self, id: i64) -> Result<bool>;

    // Domains
    async fn list_domains(&self) -> Result<Vec<domain::Model>>;
    async fn list_domains_for_project(&self, project_id: i64) -> Result<Vec<domain::Model>>;
    async fn get_domain(&self, id: i64) -> Result<Option<domain::Model>>;
    async fn get_domain_by_name(&self, name: &str) -> Result<Option<domain::Model>>;
    async fn create_domain(&self, input: NewDomain) -> Result<domain::Model>;
    async fn update_domain(&self, id: i64, patch: DomainPatch) -> Result<Option<domain::Model>>;
    async fn delete_domain(&self, id: i64) -> Result<bool>;

    // Databases
    async fn list_databases(&self) -> Result<Vec<managed_database::Model>>;
    async fn list_databases_for_project(
        &self,
        project_id: i64,
    ) -> Result<Vec<managed_database::Model>>;
    async fn get_database(&self, id: i64) -> Result<Option<managed_database::Model>>;
    async fn get_database_by_name(&self, name: &str) -> Result<Option<managed_database::Model>>;
    async fn create_database(&self, input: NewDatabase) -> Result<managed_database::Model>;
    async fn delete_database(&self, id: i64) -> Result<bool>;

    // Activities
    /// Most recently created first, at most `limit` entries
    async fn list_activities(&self, limit: u64) -> Result<Vec<activity::Model>>;
    async fn list_project_activities(
        &self,
        project_id: i64,
        limit: u64,
    ) -> Result<Vec<activity::Model>>;
    async fn create_activity(&self, input: NewActivity) -> Result<activity::Model>;

    // System metrics
    async fn latest_system_metric(&self) -> Result<Option<system_metric::Model>>;
    async fn create_system_metric(&self, input: NewSystemMetric) -> Result<system_metric::Model>;

    /// Remove domains and databases whose project no longer exists.
    /// Returns the number of records removed.
    async fn purge_orphans(&self) -> Result<u64>;
}
