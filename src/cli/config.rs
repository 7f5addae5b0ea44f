//! Per-user CLI settings in `<home>/config.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::client::ClientError;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
        }
    }
}

impl CliConfig {
    /// `$LAUNCHPAD_CLI_HOME`, falling back to `$HOME/.launchpad`
    pub fn home_dir() -> Result<PathBuf, ClientError> {
        if let Ok(dir) = std::env::var("LAUNCHPAD_CLI_HOME") {
            return Ok(PathBuf::from(dir));
        }
        std::env::var("HOME")
            .map(|home| Path::new(&home).join(".launchpad"))
            .map_err(|_| {
                ClientError::Config("Neither LAUNCHPAD_CLI_HOME nor HOME is set".to_string())
            })
    }

    pub fn load() -> Result<Self, ClientError> {
        Self::load_from(&Self::home_dir()?)
    }

    pub fn save(&self) -> Result<PathBuf, ClientError> {
        self.save_to(&Self::home_dir()?)
    }

    /// Read the config in `dir`. A missing file yields the defaults.
    pub fn load_from(dir: &Path) -> Result<Self, ClientError> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)?;
        serde_json::from_str(&raw).map_err(|e| {
            ClientError::Config(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    /// Write the config into `dir`, creating the directory if needed
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf, ClientError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(CONFIG_FILE);
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(path)
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }
}
