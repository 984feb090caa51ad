//! Configuration types for Archwright.
//!
//! Configuration is read from a single YAML file (`archwright.yaml` by
//! default). Every section is optional and falls back to its defaults, so an
//! empty file (or no file at all) yields a working local setup.
//!
//! ```yaml
//! server:
//!   port: 3000
//! generation:
//!   model: claude-sonnet-4-20250514
//!   api_key_env: ANTHROPIC_API_KEY
//! pricing:
//!   currency: USD
//!   aliases:
//!     "Azure Container Apps": "Azure Container Apps"
//! storage:
//!   path: data/analyses.json
//! ```

pub mod generation;
pub mod pricing;
pub mod server;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use generation::GenerationConfig;
pub use pricing::PricingConfig;
pub use server::ServerConfig;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "ARCHWRIGHT_CONFIG";

/// Configuration file used when nothing else is specified.
pub const DEFAULT_CONFIG_FILE: &str = "archwright.yaml";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Complete Archwright configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchwrightConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Text-generation service settings.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Retail price catalog settings.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Saved-analysis store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ArchwrightConfig {
    /// Parse configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from YAML text. Empty text yields defaults.
    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Load configuration from `explicit`, else `$ARCHWRIGHT_CONFIG`, else
    /// `archwright.yaml`. A missing default file yields defaults; a missing
    /// explicitly named file is an error. Environment overrides are applied
    /// last.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => match std::env::var(CONFIG_ENV) {
                Ok(p) => (PathBuf::from(p), true),
                Err(_) => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
            },
        };

        let mut config = if !required && !path.exists() {
            Self::default()
        } else {
            Self::from_file(&path)?
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `PORT` over `server.port`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                value: port.clone(),
            })?;
        }
        Ok(())
    }
}

/// Saved-analysis store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the list of saved analyses.
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("data/analyses.json")
}

/// Log output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
