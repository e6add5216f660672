//! Configuration loading for Clinyx.
//! Reads clinyx.toml from the current directory or the path in the CLINYX_CONFIG env var.

use std::path::{Path, PathBuf};

use clinyx_ranker::Strategy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_ENV: &str = "CLINYX_CONFIG";
pub const BIND_ENV: &str = "CLINYX_BIND";
pub const DEFAULT_CONFIG_FILE: &str = "clinyx.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read config {path}: {source}", path = path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "127.0.0.1:3000".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Knowledge base file (TOML or JSON). Absent: the built-in seed.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Drop unknown disease references instead of creating them.
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Suggestions returned per query; 0 means all.
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    /// Hide suggestions scoring below this percentage.
    #[serde(default)]
    pub min_score: f64,
    #[serde(default)]
    pub strategy: Strategy,
}

fn default_max_suggestions() -> usize { 10 }

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            max_suggestions: default_max_suggestions(),
            min_score: 0.0,
            strategy: Strategy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// tracing-subscriber filter used when RUST_LOG is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String { "clinyx=debug,info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter() }
    }
}

impl Config {
    /// Load configuration from clinyx.toml.
    /// Checks CLINYX_CONFIG env var first, then current directory.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(path)
    }

    /// Like [`Config::load`], but a missing file is `Ok(None)`.
    /// A file that exists and fails to read, parse or validate is an error.
    pub fn load_optional() -> Result<Option<Self>> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_optional_from(path)
    }

    pub fn load_optional_from(path: impl AsRef<Path>) -> Result<Option<Self>> {
        match Self::load_from(path) {
            Ok(config) => Ok(Some(config)),
            Err(ConfigError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let floor = self.inference.min_score;
        if !floor.is_finite() || !(0.0..=100.0).contains(&floor) {
            return Err(ConfigError::Invalid(format!(
                "inference.min_score must be within 0..=100, got {floor}"
            )));
        }
        if self.server.bind.trim().is_empty() {
            return Err(ConfigError::Invalid("server.bind must not be empty".to_string()));
        }
        Ok(())
    }

    /// Apply the CLINYX_BIND override, if set.
    pub fn with_bind_override(mut self, bind: Option<String>) -> Self {
        if let Some(bind) = bind.filter(|b| !b.trim().is_empty()) {
            self.server.bind = bind;
        }
        self
    }
}
