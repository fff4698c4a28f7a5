//! Application configuration loaded from a TOML file
//!
//! Every field has a default, so an empty or missing default config file is
//! a valid configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR: &str = "ielts-vocab";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub srs: SrsConfig,
    #[serde(default)]
    pub review: ReviewConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Name attached to every authenticated request
    #[serde(default = "default_user")]
    pub user: String,
    /// Bearer token; generated at startup when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8460
}

fn default_user() -> String {
    "learner".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            user: default_user(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SrsConfig {
    /// Days until the next review for levels 0 through 5
    #[serde(default = "default_intervals")]
    pub intervals_days: Vec<i64>,
    /// Days until the next review after an incorrect answer
    #[serde(default = "default_lapse_interval")]
    pub lapse_interval_days: i64,
}

fn default_intervals() -> Vec<i64> {
    vec![1, 2, 4, 7, 14, 30]
}

fn default_lapse_interval() -> i64 {
    1
}

impl Default for SrsConfig {
    fn default() -> Self {
        Self {
            intervals_days: default_intervals(),
            lapse_interval_days: default_lapse_interval(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    #[serde(default = "default_due_limit")]
    pub due_limit: usize,
}

fn default_due_limit() -> usize {
    20
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            due_limit: default_due_limit(),
        }
    }
}

impl AppConfig {
    /// Load from an explicit path, or from the default location if `path` is None.
    ///
    /// An explicit path must exist; the default location may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            if required {
                return Err(ConfigError::NotFound(path));
            }
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR).join("config.toml"))
    }

    /// Configured data directory, falling back to the platform data dir
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.storage.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_local_dir()
            .map(|p| p.join(APP_DIR))
            .ok_or(ConfigError::DataDirNotFound)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.review.due_limit == 0 {
            return Err(ConfigError::Invalid(
                "review.due_limit must be positive".to_string(),
            ));
        }
        if self.server.user.trim().is_empty() {
            return Err(ConfigError::Invalid("server.user must not be empty".to_string()));
        }
        if let Some(token) = &self.server.token {
            if token.trim().is_empty() {
                return Err(ConfigError::Invalid("server.token must not be empty".to_string()));
            }
        }
        // The scheduler re-checks the curve; this gives a config-level message
        crate::srs::Scheduler::from_config(&self.srs)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(())
    }
}
