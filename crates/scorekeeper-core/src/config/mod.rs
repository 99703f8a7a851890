//! Configuration types for Scorekeeper.
//!
//! Configuration is loaded from a single YAML file (`scorekeeper.yaml` by
//! default). Every field has a default, so an absent file or an empty document
//! yields a usable configuration that reads the connection URL from
//! `DATABASE_URL`.

pub mod database;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use database::{ConnectionPoolConfig, DatabaseConfig};

/// Complete Scorekeeper configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScorekeeperConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL connection.
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address, e.g. "0.0.0.0:3000"
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:3000".to_string()
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ScorekeeperConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    ///
    /// An empty document is accepted and produces the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }

    /// Load from `path` when it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}
