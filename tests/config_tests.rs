//! Tests for configuration module

use launchpad::config::storage::{StorageBackend, StorageConfig};
use launchpad::config::{Config, CONFIG};

#[test]
fn test_config_defaults() {
    // Env vars are not set in the test environment
    let config = Config::from_env();

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 5000);
    assert!(config.server.allowed_origins.is_empty());
    assert_eq!(config.storage.backend(), Ok(StorageBackend::Memory));
    assert!(config.storage.seed_demo);
    assert_eq!(config.log_level, "info");
}

#[test]
fn test_scheduler_defaults() {
    let config = Config::from_env();

    assert_eq!(config.scheduler.orphan_sweep_interval.as_secs(), 300);
    assert_eq!(config.scheduler.metrics_sample_interval.as_secs(), 60);
}

#[test]
fn test_database_url_present() {
    let config = Config::from_env();

    assert!(
        !config.database.database_url.is_empty(),
        "Expected a database URL"
    );
    assert_eq!(config.database.max_connections, 10);
    assert_eq!(config.database.connect_timeout.as_secs(), 30);
}

#[test]
fn test_version_from_cargo() {
    let config = Config::from_env();
    // Version should be set from Cargo.toml
    assert!(!config.version.is_empty());
    assert!(config.version.contains('.'));
}

#[test]
fn test_config_clone() {
    let config1 = Config::from_env();
    let config2 = config1.clone();

    assert_eq!(config1.server.host, config2.server.host);
    assert_eq!(config1.server.port, config2.server.port);
    assert_eq!(config1.database.database_url, config2.database.database_url);
    assert_eq!(config1.storage.backend(), config2.storage.backend());
}

#[test]
fn test_config_debug() {
    let config = Config::from_env();
    let debug_str = format!("{:?}", config);

    assert!(debug_str.contains("host"));
    assert!(debug_str.contains("port"));
    assert!(debug_str.contains("database_url"));
    assert!(debug_str.contains("orphan_sweep_interval"));
}

#[test]
fn test_global_config_matches_from_env() {
    let fresh = Config::from_env();

    assert_eq!(CONFIG.server.port, fresh.server.port);
    assert_eq!(CONFIG.version, fresh.version);
}

#[test]
fn test_unknown_storage_backend_is_an_error() {
    let config = StorageConfig {
        requested_backend: Some("postgres".to_string()),
        seed_demo: true,
    };

    let err = config.backend().unwrap_err();
    assert!(err.contains("postgres"));
}

#[test]
fn test_storage_backend_aliases() {
    for (value, expected) in [("memory", StorageBackend::Memory), ("database", StorageBackend::Database)] {
        let config = StorageConfig {
            requested_backend: Some(value.to_string()),
            seed_demo: false,
        };
        assert_eq!(config.backend(), Ok(expected));
    }
}
