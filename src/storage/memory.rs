//! In-process storage: one arena per collection behind a single lock.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use super::{
    describe, DomainPatch, NewActivity, NewDatabase, NewDomain, NewProject, NewSystemMetric,
    NewUser, ProjectPatch, Storage,
};
use crate::error::{AppError, Result};
use crate::models::activity::ActivityKind;
use crate::models::domain::DomainStatus;
use crate::models::project::ProjectStatus;
use crate::models::{activity, database as managed_database, domain, project, system_metric, user};

/// Records keyed by id, plus the counter that hands out the next id.
/// Ids start at 1 and are never reused, even after deletion.
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    fn allocate(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.values().find(|row| pred(row)).cloned()
    }

    fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|row| pred(row)).cloned().collect()
    }
}

#[derive(Default)]
struct Collections {
    users: Table<user::Model>,
    projects: Table<project::Model>,
    domains: Table<domain::Model>,
    databases: Table<managed_database::Model>,
    activities: Table<activity::Model>,
    system_metrics: Table<system_metric::Model>,
}

impl Collections {
    fn append_activity(&mut self, input: NewActivity) -> activity::Model {
        let id = self.activities.allocate();
        let record = activity::Model {
            id,
            kind: input.kind,
            description: input.description,
            project_id: input.project_id,
            created_at: Utc::now(),
        };
        self.activities.rows.insert(id, record.clone());
        record
    }
}

/// Newest first; ids break timestamp ties so insertion order is preserved
fn newest_first(mut activities: Vec<activity::Model>, limit: u64) -> Vec<activity::Model> {
    activities.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    activities.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    activities
}

/// Storage held entirely in process memory
#[derive(Default)]
pub struct MemoryStorage {
    inner: Mutex<Collections>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_user(&self, id: i64) -> Result<Option<user::Model>> {
        Ok(self.inner.lock().users.get(id))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<user::Model>> {
        Ok(self.inner.lock().users.find(|u| u.username == username))
    }

    async fn create_user(&self, input: NewUser) -> Result<user::Model> {
        let mut inner = self.inner.lock();
        if inner.users.find(|u| u.username == input.username).is_some() {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let id = inner.users.allocate();
        let record = user::Model {
            id,
            username: input.username,
            password: input.password,
            email: input.email,
        };
        inner.users.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn list_projects(&self) -> Result<Vec<project::Model>> {
        let mut projects = self.inner.lock().projects.filter(|_| true);
        projects.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(projects)
    }

    async fn get_project(&self, id: i64) -> Result<Option<project::Model>> {
        Ok(self.inner.lock().projects.get(id))
    }

    async fn create_project(&self, input: NewProject) -> Result<project::Model> {
        let mut inner = self.inner.lock();
        let now = Utc::now();

        let id = inner.projects.allocate();
        let record = project::Model {
            id,
            name: input.name,
            framework: input.framework,
            repository_url: input.repository_url,
            branch: input.branch,
            domain: input.domain,
            status: ProjectStatus::Idle,
            created_at: now,
            updated_at: now,
        };
        inner.projects.rows.insert(id, record.clone());

        inner.append_activity(NewActivity::new(
            ActivityKind::Project,
            describe(ActivityKind::Project, "created", &record.name),
            Some(id),
        ));

        tracing::debug!(project_id = id, "Project created");
        Ok(record)
    }

    async fn update_project(&self, id: i64, patch: ProjectPatch) -> Result<Option<project::Model>> {
        let mut inner = self.inner.lock();
        let Some(existing) = inner.projects.rows.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            existing.name = name;
        }
        if let Some(framework) = patch.framework {
            existing.framework = framework;
        }
        if let Some(repository_url) = patch.repository_url {
            existing.repository_url = repository_url;
        }
        if let Some(branch) = patch.branch {
            existing.branch = branch;
        }
        if let Some(domain) = patch.domain {
            existing.domain = domain;
        }
        if let Some(status) = patch.status {
            existing.status = status;
        }
        existing.updated_at = Utc::now();

        Ok(Some(existing.clone()))
    }

    async fn delete_project(&self, id: i64) -> Result<bool> {
        let mut inner = self.inner.lock();
        let Some(existing) = inner.projects.get(id) else {
            return Ok(false);
        };

        inner.domains.rows.retain(|_, d| d.project_id != Some(id));
        inner.databases.rows.retain(|_, d| d.project_id != Some(id));

        // The project is gone, so the activity cannot be attributed to it
        inner.append_activity(NewActivity::new(
            ActivityKind::Project,
            describe(ActivityKind::Project, "deleted", &existing.name),
            None,
        ));

        inner.projects.rows.remove(&id);
        tracing::debug!(project_id = id, "Project deleted with dependents");
        Ok(true)
    }

    async fn list_domains(&self) -> Result<Vec<domain::Model>> {
        Ok(self.inner.lock().domains.filter(|_| true))
    }

    async fn list_domains_for_project(&self, project_id: i64) -> Result<Vec<domain::Model>> {
        Ok(self
            .inner
            .lock()
            .domains
            .filter(|d| d.project_id == Some(project_id)))
    }

    async fn get_domain(&self, id: i64) -> Result<Option<domain::Model>> {
        Ok(self.inner.lock().domains.get(id))
    }

    async fn get_domain_by_name(&self, name: &str) -> Result<Option<domain::Model>> {
        Ok(self.inner.lock().domains.find(|d| d.name == name))
    }

    async fn create_domain(&self, input: NewDomain) -> Result<domain::Model> {
        let mut inner = self.inner.lock();
        if inner.domains.find(|d| d.name == input.name).is_some() {
            return Err(AppError::Conflict("Domain already exists".to_string()));
        }

        let id = inner.domains.allocate();
        let record = domain::Model {
            id,
            name: input.name,
            project_id: input.project_id,
            status: DomainStatus::Pending,
            created_at: Utc::now(),
        };
        inner.domains.rows.insert(id, record.clone());

        inner.append_activity(NewActivity::new(
            ActivityKind::Domain,
            describe(ActivityKind::Domain, "created", &record.name),
            record.project_id,
        ));

        Ok(record)
    }

    async fn update_domain(&self, id: i64, patch: DomainPatch) -> Result<Option<domain::Model>> {
        let mut inner = self.inner.lock();
        if !inner.domains.rows.contains_key(&id) {
            return Ok(None);
        }
        if let Some(name) = &patch.name {
            if inner.domains.find(|d| d.name == *name && d.id != id).is_some() {
                return Err(AppError::Conflict("Domain already exists".to_string()));
            }
        }

        let Some(existing) = inner.domains.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            existing.name = name;
        }
        if let Some(project_id) = patch.project_id {
            existing.project_id = project_id;
        }
        if let Some(status) = patch.status {
            existing.status = status;
        }

        Ok(Some(existing.clone()))
    }

    async fn delete_domain(&self, id: i64) -> Result<bool> {
        let mut inner = self.inner.lock();
        let Some(existing) = inner.domains.get(id) else {
            return Ok(false);
        };

        inner.append_activity(NewActivity::new(
            ActivityKind::Domain,
            describe(ActivityKind::Domain, "deleted", &existing.name),
            existing.project_id,
        ));
        inner.domains.rows.remove(&id);
        Ok(true)
    }

    async fn list_databases(&self) -> Result<Vec<managed_database::Model>> {
        Ok(self.inner.lock().databases.filter(|_| true))
    }

    async fn list_databases_for_project(
        &self,
        project_id: i64,
    ) -> Result<Vec<managed_database::Model>> {
        Ok(self
            .inner
            .lock()
            .databases
            .filter(|d| d.project_id == Some(project_id)))
    }

    async fn get_database(&self, id: i64) -> Result<Option<managed_database::Model>> {
        Ok(self.inner.lock().databases.get(id))
    }

    async fn get_database_by_name(&self, name: &str) -> Result<Option<managed_database::Model>> {
        Ok(self.inner.lock().databases.find(|d| d.name == name))
    }

    async fn create_database(&self, input: NewDatabase) -> Result<managed_database::Model> {
        let mut inner = self.inner.lock();
        if inner.databases.find(|d| d.name == input.name).is_some() {
            return Err(AppError::Conflict(
                "Database with this name already exists".to_string(),
            ));
        }

        let id = inner.databases.allocate();
        let record = managed_database::Model {
            id,
            name: input.name,
            db_type: input.db_type,
            project_id: input.project_id,
            connection_string: input.connection_string,
            created_at: Utc::now(),
        };
        inner.databases.rows.insert(id, record.clone());

        inner.append_activity(NewActivity::new(
            ActivityKind::Database,
            describe(ActivityKind::Database, "created", &record.name),
            record.project_id,
        ));

        Ok(record)
    }

    async fn delete_database(&self, id: i64) -> Result<bool> {
        let mut inner = self.inner.lock();
        let Some(existing) = inner.databases.get(id) else {
            return Ok(false);
        };

        inner.append_activity(NewActivity::new(
            ActivityKind::Database,
            describe(ActivityKind::Database, "deleted", &existing.name),
            existing.project_id,
        ));
        inner.databases.rows.remove(&id);
        Ok(true)
    }

    async fn list_activities(&self, limit: u64) -> Result<Vec<activity::Model>> {
        let activities = self.inner.lock().activities.filter(|_| true);
        Ok(newest_first(activities, limit))
    }

    async fn list_project_activities(
        &self,
        project_id: i64,
        limit: u64,
    ) -> Result<Vec<activity::Model>> {
        let activities = self
            .inner
            .lock()
            .activities
            .filter(|a| a.project_id == Some(project_id));
        Ok(newest_first(activities, limit))
    }

    async fn create_activity(&self, input: NewActivity) -> Result<activity::Model> {
        Ok(self.inner.lock().append_activity(input))
    }

    async fn latest_system_metric(&self) -> Result<Option<system_metric::Model>> {
        Ok(self
            .inner
            .lock()
            .system_metrics
            .rows
            .values()
            .max_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)))
            .cloned())
    }

    async fn create_system_metric(&self, input: NewSystemMetric) -> Result<system_metric::Model> {
        let mut inner = self.inner.lock();
        let id = inner.system_metrics.allocate();
        let record = system_metric::Model {
            id,
            cpu_usage: input.cpu_usage,
            memory_usage: input.memory_usage,
            disk_usage: input.disk_usage,
            network_usage: input.network_usage,
            timestamp: Utc::now(),
        };
        inner.system_metrics.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn purge_orphans(&self) -> Result<u64> {
        let mut inner = self.inner.lock();
        let Collections {
            projects,
            domains,
            databases,
            ..
        } = &mut *inner;

        let is_orphan = |project_id: Option<i64>| {
            project_id.is_some_and(|pid| !projects.rows.contains_key(&pid))
        };

        let before = domains.rows.len() + databases.rows.len();
        domains.rows.retain(|_, d| !is_orphan(d.project_id));
        databases.rows.retain(|_, d| !is_orphan(d.project_id));
        let removed = before - (domains.rows.len() + databases.rows.len());

        Ok(removed as u64)
    }
}
