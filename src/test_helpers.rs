//! Test helpers shared by unit tests inside the crate.

use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::migrations::Migrator;
use crate::storage::NewProject;

/// Create an in-memory SQLite database for testing
pub async fn create_test_db() -> DatabaseConnection {
    // Each connection gets its own database; sea-orm keeps a single one for `sqlite::memory:`
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run test migrations");

    db
}

pub fn new_project(name: &str) -> NewProject {
    NewProject {
        name: name.to_string(),
        framework: "React".to_string(),
        repository_url: format!("https://github.com/acme/{}", name.to_lowercase()),
        branch: "main".to_string(),
        domain: None,
    }
}
