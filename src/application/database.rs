//! Connection pool for the database-backed store. Migrations run on connect.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;

use crate::config::database::DatabaseConfig;
use crate::config::CONFIG;
use crate::error::{AppError, Result};
use crate::migrations::Migrator;

pub type DbConn = DatabaseConnection;

pub async fn connect() -> Result<DbConn> {
    connect_with(&CONFIG.database).await
}

pub async fn connect_with(config: &DatabaseConfig) -> Result<DbConn> {
    let pool_size = if config.is_in_memory() {
        1
    } else {
        config.max_connections
    };
    tracing::info!(pool_size, "Connecting to database");

    let mut opts = ConnectOptions::new(config.database_url.as_str());
    opts.max_connections(pool_size)
        .min_connections(1)
        .connect_timeout(config.connect_timeout)
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    let db = Database::connect(opts)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to connect to database: {}", e)))?;

    Migrator::up(&db, None)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to run migrations: {}", e)))?;
    tracing::info!("Database schema is up to date");

    Ok(db)
}
