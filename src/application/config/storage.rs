use std::env;
use std::fmt;
use std::str::FromStr;

/// Which `Storage` implementation the server runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Database,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(StorageBackend::Memory),
            "database" | "db" | "sql" => Ok(StorageBackend::Database),
            other => Err(format!("Unknown storage backend: {}", other)),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::Database => write!(f, "database"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Raw `LAUNCHPAD_STORAGE` value, unset means memory
    pub requested_backend: Option<String>,
    /// Populate an empty store with demo projects, domains and databases
    pub seed_demo: bool,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            requested_backend: env::var("LAUNCHPAD_STORAGE").ok(),
            seed_demo: super::env_flag("LAUNCHPAD_SEED_DEMO", true),
        }
    }

    /// The selected backend. An unrecognised value is an error, never a silent fallback.
    pub fn backend(&self) -> Result<StorageBackend, String> {
        match &self.requested_backend {
            Some(value) => value.parse(),
            None => Ok(StorageBackend::Memory),
        }
    }
}
