//! sea-orm backed storage. Multi-row mutations run in one transaction.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, Set, SqlErr, TransactionTrait,
};

use super::{
    describe, DomainPatch, NewActivity, NewDatabase, NewDomain, NewProject, NewSystemMetric,
    NewUser, ProjectPatch, Storage,
};
use crate::db::DbConn;
use crate::error::{AppError, Result};
use crate::models::activity::ActivityKind;
use crate::models::domain::DomainStatus;
use crate::models::prelude::*;
use crate::models::project::ProjectStatus;
use crate::models::{activity, database as managed_database, domain, project, system_metric, user};

/// Storage over a relational database (SQLite or PostgreSQL)
#[derive(Clone)]
pub struct DatabaseStorage {
    db: DbConn,
}

impl DatabaseStorage {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DbConn {
        &self.db
    }
}

/// A UNIQUE index rejection means a concurrent writer got past the pre-check first
fn conflict_on_unique(err: DbErr, message: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(message.to_string()),
        _ => AppError::Database(err),
    }
}

async fn insert_activity<C: ConnectionTrait>(conn: &C, input: NewActivity) -> Result<activity::Model> {
    let entry = activity::ActiveModel {
        kind: Set(input.kind),
        description: Set(input.description),
        project_id: Set(input.project_id),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    Ok(entry.insert(conn).await?)
}

#[async_trait]
impl Storage for DatabaseStorage {
    async fn get_user(&self, id: i64) -> Result<Option<user::Model>> {
        Ok(User::find_by_id(id).one(&self.db).await?)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<user::Model>> {
        Ok(User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?)
    }

    async fn create_user(&self, input: NewUser) -> Result<user::Model> {
        let txn = self.db.begin().await?;

        let existing = User::find()
            .filter(user::Column::Username.eq(&input.username))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let created = user::ActiveModel {
            username: Set(input.username),
            password: Set(input.password),
            email: Set(input.email),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| conflict_on_unique(e, "Username already exists"))?;

        txn.commit().await?;
        Ok(created)
    }

    async fn list_projects(&self) -> Result<Vec<project::Model>> {
        Ok(Project::find()
            .order_by_desc(project::Column::UpdatedAt)
            .order_by_desc(project::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn get_project(&self, id: i64) -> Result<Option<project::Model>> {
        Ok(Project::find_by_id(id).one(&self.db).await?)
    }

    async fn create_project(&self, input: NewProject) -> Result<project::Model> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let created = project::ActiveModel {
            name: Set(input.name),
            framework: Set(input.framework),
            repository_url: Set(input.repository_url),
            branch: Set(input.branch),
            domain: Set(input.domain),
            status: Set(ProjectStatus::Idle),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        insert_activity(
            &txn,
            NewActivity::new(
                ActivityKind::Project,
                describe(ActivityKind::Project, "created", &created.name),
                Some(created.id),
            ),
        )
        .await?;

        txn.commit().await?;
        tracing::debug!(project_id = created.id, "Project created");
        Ok(created)
    }

    async fn update_project(&self, id: i64, patch: ProjectPatch) -> Result<Option<project::Model>> {
        let Some(existing) = Project::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: project::ActiveModel = existing.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(framework) = patch.framework {
            active.framework = Set(framework);
        }
        if let Some(repository_url) = patch.repository_url {
            active.repository_url = Set(repository_url);
        }
        if let Some(branch) = patch.branch {
            active.branch = Set(branch);
        }
        if let Some(domain) = patch.domain {
            active.domain = Set(domain);
        }
        if let Some(status) = patch.status {
            active.status = Set(status);
        }
        active.updated_at = Set(Utc::now());

        Ok(Some(active.update(&self.db).await?))
    }

    async fn delete_project(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        let Some(existing) = Project::find_by_id(id).one(&txn).await? else {
            return Ok(false);
        };

        let domains = Domain::delete_many()
            .filter(domain::Column::ProjectId.eq(id))
            .exec(&txn)
            .await?;
        let databases = ManagedDatabase::delete_many()
            .filter(managed_database::Column::ProjectId.eq(id))
            .exec(&txn)
            .await?;

        // The project is gone, so the activity cannot be attributed to it
        insert_activity(
            &txn,
            NewActivity::new(
                ActivityKind::Project,
                describe(ActivityKind::Project, "deleted", &existing.name),
                None,
            ),
        )
        .await?;

        Project::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        tracing::debug!(
            project_id = id,
            domains = domains.rows_affected,
            databases = databases.rows_affected,
            "Project deleted with dependents"
        );
        Ok(true)
    }

    async fn list_domains(&self) -> Result<Vec<domain::Model>> {
        Ok(Domain::find()
            .order_by_asc(domain::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn list_domains_for_project(&self, project_id: i64) -> Result<Vec<domain::Model>> {
        Ok(Domain::find()
            .filter(domain::Column::ProjectId.eq(project_id))
            .order_by_asc(domain::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn get_domain(&self, id: i64) -> Result<Option<domain::Model>> {
        Ok(Domain::find_by_id(id).one(&self.db).await?)
    }

    async fn get_domain_by_name(&self, name: &str) -> Result<Option<domain::Model>> {
        Ok(Domain::find()
            .filter(domain::Column::Name.eq(name))
            .one(&self.db)
            .await?)
    }

    async fn create_domain(&self, input: NewDomain) -> Result<domain::Model> {
        let txn = self.db.begin().await?;

        let existing = Domain::find()
            .filter(domain::Column::Name.eq(&input.name))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict("Domain already exists".to_string()));
        }

        let created = domain::ActiveModel {
            name: Set(input.name),
            project_id: Set(input.project_id),
            status: Set(DomainStatus::Pending),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| conflict_on_unique(e, "Domain already exists"))?;

        insert_activity(
            &txn,
            NewActivity::new(
                ActivityKind::Domain,
                describe(ActivityKind::Domain, "created", &created.name),
                created.project_id,
            ),
        )
        .await?;

        txn.commit().await?;
        Ok(created)
    }

    async fn update_domain(&self, id: i64, patch: DomainPatch) -> Result<Option<domain::Model>> {
        let txn = self.db.begin().await?;

        let Some(existing) = Domain::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        if let Some(name) = &patch.name {
            let clash = Domain::find()
                .filter(domain::Column::Name.eq(name))
                .filter(domain::Column::Id.ne(id))
                .one(&txn)
                .await?;
            if clash.is_some() {
                return Err(AppError::Conflict("Domain already exists".to_string()));
            }
        }

        let mut active: domain::ActiveModel = existing.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(project_id) = patch.project_id {
            active.project_id = Set(project_id);
        }
        if let Some(status) = patch.status {
            active.status = Set(status);
        }

        let updated = active
            .update(&txn)
            .await
            .map_err(|e| conflict_on_unique(e, "Domain already exists"))?;
        txn.commit().await?;
        Ok(Some(updated))
    }

    async fn delete_domain(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        let Some(existing) = Domain::find_by_id(id).one(&txn).await? else {
            return Ok(false);
        };

        insert_activity(
            &txn,
            NewActivity::new(
                ActivityKind::Domain,
                describe(ActivityKind::Domain, "deleted", &existing.name),
                existing.project_id,
            ),
        )
        .await?;
        Domain::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(true)
    }

    async fn list_databases(&self) -> Result<Vec<managed_database::Model>> {
        Ok(ManagedDatabase::find()
            .order_by_asc(managed_database::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn list_databases_for_project(
        &self,
        project_id: i64,
    ) -> Result<Vec<managed_database::Model>> {
        Ok(ManagedDatabase::find()
            .filter(managed_database::Column::ProjectId.eq(project_id))
            .order_by_asc(managed_database::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn get_database(&self, id: i64) -> Result<Option<managed_database::Model>> {
        Ok(ManagedDatabase::find_by_id(id).one(&self.db).await?)
    }

    async fn get_database_by_name(&self, name: &str) -> Result<Option<managed_database::Model>> {
        Ok(ManagedDatabase::find()
            .filter(managed_database::Column::Name.eq(name))
            .one(&self.db)
            .await?)
    }

    async fn create_database(&self, input: NewDatabase) -> Result<managed_database::Model> {
        let txn = self.db.begin().await?;

        let existing = ManagedDatabase::find()
            .filter(managed_database::Column::Name.eq(&input.name))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict(
                "Database with this name already exists".to_string(),
            ));
        }

        let created = managed_database::ActiveModel {
            name: Set(input.name),
            db_type: Set(input.db_type),
            project_id: Set(input.project_id),
            connection_string: Set(input.connection_string),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| conflict_on_unique(e, "Database with this name already exists"))?;

        insert_activity(
            &txn,
            NewActivity::new(
                ActivityKind::Database,
                describe(ActivityKind::Database, "created", &created.name),
                created.project_id,
            ),
        )
        .await?;

        txn.commit().await?;
        Ok(created)
    }

    async fn delete_database(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        let Some(existing) = ManagedDatabase::find_by_id(id).one(&txn).await? else {
            return Ok(false);
        };

        insert_activity(
            &txn,
            NewActivity::new(
                ActivityKind::Database,
                describe(ActivityKind::Database, "deleted", &existing.name),
                existing.project_id,
            ),
        )
        .await?;
        ManagedDatabase::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(true)
    }

    async fn list_activities(&self, limit: u64) -> Result<Vec<activity::Model>> {
        Ok(Activity::find()
            .order_by_desc(activity::Column::CreatedAt)
            .order_by_desc(activity::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?)
    }

    async fn list_project_activities(
        &self,
        project_id: i64,
        limit: u64,
    ) -> Result<Vec<activity::Model>> {
        Ok(Activity::find()
            .filter(activity::Column::ProjectId.eq(project_id))
            .order_by_desc(activity::Column::CreatedAt)
            .order_by_desc(activity::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?)
    }

    async fn create_activity(&self, input: NewActivity) -> Result<activity::Model> {
        insert_activity(&self.db, input).await
    }

    async fn latest_system_metric(&self) -> Result<Option<system_metric::Model>> {
        Ok(SystemMetric::find()
            .order_by_desc(system_metric::Column::Timestamp)
            .order_by_desc(system_metric::Column::Id)
            .one(&self.db)
            .await?)
    }

    async fn create_system_metric(&self, input: NewSystemMetric) -> Result<system_metric::Model> {
        let entry = system_metric::ActiveModel {
            cpu_usage: Set(input.cpu_usage),
            memory_usage: Set(input.memory_usage),
            disk_usage: Set(input.disk_usage),
            network_usage: Set(input.network_usage),
            timestamp: Set(Utc::now()),
            ..Default::default()
        };
        Ok(entry.insert(&self.db).await?)
    }

    async fn purge_orphans(&self) -> Result<u64> {
        let txn = self.db.begin().await?;

        // Correlated against the live table, so a project committed mid-sweep keeps its rows
        let live_projects = || {
            Project::find()
                .select_only()
                .column(project::Column::Id)
                .into_query()
        };

        let domains = Domain::delete_many()
            .filter(domain::Column::ProjectId.is_not_null())
            .filter(domain::Column::ProjectId.not_in_subquery(live_projects()))
            .exec(&txn)
            .await?;
        let databases = ManagedDatabase::delete_many()
            .filter(managed_database::Column::ProjectId.is_not_null())
            .filter(managed_database::Column::ProjectId.not_in_subquery(live_projects()))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(domains.rows_affected + databases.rows_affected)
    }
}
