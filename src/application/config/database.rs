use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("LAUNCHPAD_DATABASE_URL")
                .or_else(|_| env::var("DATABASE_URL"))
                .unwrap_or_else(|_| "sqlite://launchpad.db?mode=rwc".to_string()),
            max_connections: env::var("LAUNCHPAD_DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(10),
            connect_timeout: Duration::from_secs(30),
        }
    }

    /// Every pooled connection to an in-memory SQLite URL opens its own empty database
    pub fn is_in_memory(&self) -> bool {
        self.database_url.starts_with("sqlite::memory:")
    }
}
