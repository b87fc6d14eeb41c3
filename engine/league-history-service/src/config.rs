//! Service configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Service-level configuration
    pub service: ServiceSettings,

    /// Storage backend configuration
    pub storage: StorageConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// JSON dataset export to serve
    pub dataset_file: PathBuf,

    /// Franchise alias table override (built-in table when unset)
    pub aliases_file: Option<PathBuf>,
}

/// Storage backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend to serve queries from (memory, sqlite)
    pub backend: String,

    /// Database URL for the sqlite backend
    pub database_url: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty)
    pub format: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self { dataset_file: PathBuf::from("./data/league.json"), aliases_file: None }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            database_url: "sqlite://./data/league.db".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

/// Load configuration from an optional file and environment variables
pub fn load_config(config_file: Option<&Path>) -> Result<ServiceConfig> {
    let mut config = match config_file {
        Some(path) => {
            tracing::debug!("Loading configuration from file: {:?}", path);
            load_from_file(path)?
        }
        None => ServiceConfig::default(),
    };

    // Override with environment variables
    load_from_env(&mut config);

    // Validate configuration
    validate_config(&config)?;

    Ok(config)
}

/// Load configuration from a TOML file
fn load_from_file(path: &Path) -> Result<ServiceConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    toml::from_str(&contents).with_context(|| format!("Failed to parse config file: {:?}", path))
}

/// Load configuration from environment variables
fn load_from_env(config: &mut ServiceConfig) {
    if let Ok(dataset) = std::env::var("LEAGUE_DATASET") {
        config.service.dataset_file = PathBuf::from(dataset);
    }

    if let Ok(aliases) = std::env::var("LEAGUE_ALIASES") {
        config.service.aliases_file = Some(PathBuf::from(aliases));
    }

    if let Ok(backend) = std::env::var("LEAGUE_BACKEND") {
        config.storage.backend = backend;
    }

    if let Ok(url) = std::env::var("LEAGUE_DATABASE_URL") {
        config.storage.database_url = url;
    }

    if let Ok(level) = std::env::var("LEAGUE_LOG_LEVEL") {
        config.logging.level = level;
    }

    if let Ok(format) = std::env::var("LEAGUE_LOG_FORMAT") {
        config.logging.format = format;
    }
}

/// Validate configuration
fn validate_config(config: &ServiceConfig) -> Result<()> {
    match config.logging.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow::anyhow!("Invalid log level: {}", config.logging.level)),
    }

    match config.logging.format.as_str() {
        "json" | "pretty" => {}
        _ => return Err(anyhow::anyhow!("Invalid log format: {}", config.logging.format)),
    }

    match config.storage.backend.as_str() {
        "memory" | "sqlite" => {}
        _ => return Err(anyhow::anyhow!("Invalid storage backend: {}", config.storage.backend)),
    }

    Ok(())
}
