//! Service configuration.
//!
//! Read from an optional TOML file; every key has a default, and command-line
//! flags override whatever the file sets.
//!
//! ```toml
//! bind = "0.0.0.0:8000"
//! dataset = "data/ehr_synthetic_max_features.csv"
//! knowledge = "config/knowledge.toml"
//! require_dataset = true
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use cohortrx_contracts::error::{RecommenderError, RecommenderResult};

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_DATASET: &str = "data/ehr_synthetic_max_features.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
    /// CSV corpus loaded at startup and on `POST /data/reload`.
    pub dataset: PathBuf,
    /// Reference-table TOML. The built-in tables are used when unset.
    pub knowledge: Option<PathBuf>,
    /// Abort startup if the dataset cannot be loaded. When false the service
    /// starts unloaded and `/predict` answers 503 until a reload succeeds.
    pub require_dataset: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            dataset: PathBuf::from(DEFAULT_DATASET),
            knowledge: None,
            require_dataset: true,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(s: &str) -> RecommenderResult<Self> {
        toml::from_str(s).map_err(|e| RecommenderError::ConfigError {
            reason: format!("failed to parse server config: {}", e),
        })
    }

    pub fn from_file(path: &Path) -> RecommenderResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| RecommenderError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn bind_addr(&self) -> RecommenderResult<SocketAddr> {
        self.bind.parse().map_err(|e| RecommenderError::ConfigError {
            reason: format!("invalid bind address '{}': {}", self.bind, e),
        })
    }
}
