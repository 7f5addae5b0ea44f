pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_users;
mod m20250101_000002_create_projects;
mod m20250101_000003_create_domains;
mod m20250101_000004_create_databases;
mod m20250101_000005_create_activities;
mod m20250101_000006_create_system_metrics;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_users::Migration),
            Box::new(m20250101_000002_create_projects::Migration),
            Box::new(m20250101_000003_create_domains::Migration),
            Box::new(m20250101_000004_create_databases::Migration),
            Box::new(m20250101_000005_create_activities::Migration),
            Box::new(m20250101_000006_create_system_metrics::Migration),
        ]
    }
}
