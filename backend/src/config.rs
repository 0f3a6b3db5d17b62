//! # Service Configuration
//!
//! Configuration is read from an optional YAML file whose path is given by
//! `ACCOUNT_SERVICE_CONFIG`. Missing keys (or a missing file) fall back to
//! defaults, and `DATABASE_URL` / `BIND_ADDRESS` override the file.
//!
//! ```yaml
//! bind_address: "127.0.0.1:3000"
//! database_url: "sqlite:accounts.db"
//! cors_origin: "http://localhost:8080"
//! log_filter: "info"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

pub const CONFIG_PATH_VAR: &str = "ACCOUNT_SERVICE_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bind_address: String,
    pub database_url: String,
    pub cors_origin: String,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            database_url: "sqlite:accounts.db".to_string(),
            cors_origin: "http://localhost:8080".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the file named by `ACCOUNT_SERVICE_CONFIG`
    /// (if any), then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database_url = url;
        }
        if let Ok(address) = std::env::var("BIND_ADDRESS") {
            config.bind_address = address;
        }
        Ok(config)
    }

    /// Read a YAML config file; a file that does not exist yields defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_yaml(&yaml_content)
    }

    pub fn from_yaml(yaml_content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml_content).context("Invalid config file")?;
        Ok(config)
    }
}
