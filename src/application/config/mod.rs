pub mod database;
pub mod scheduler;
pub mod server;
pub mod storage;

use once_cell::sync::Lazy;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server: server::ServerConfig,
    pub database: database::DatabaseConfig,
    pub storage: storage::StorageConfig,
    pub scheduler: scheduler::SchedulerConfig,

    // Build info
    pub commit_hash: String,
    pub build_time: String,
    pub version: String,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server: server::ServerConfig::from_env(),
            database: database::DatabaseConfig::from_env(),
            storage: storage::StorageConfig::from_env(),
            scheduler: scheduler::SchedulerConfig::from_env(),

            // Build info
            commit_hash: env::var("COMMIT_HASH").unwrap_or_else(|_| "unknown".to_string()),
            build_time: env::var("BUILD_TIME").unwrap_or_else(|_| "unknown".to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),

            // Logging
            log_level: env::var("LAUNCHPAD_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

/// Parse a boolean flag, accepting `true`/`1`/`yes` in any case.
pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(default)
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
