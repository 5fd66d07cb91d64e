//! Configuration management.
//!
//! Settings come from, in increasing priority: built-in defaults, a TOML
//! file, and `BOOK_FINDER_`-prefixed environment variables (nested keys use
//! a double underscore, e.g. `BOOK_FINDER_CATALOG__ENDPOINT`).

mod file_config;

pub use file_config::{write_default_config, ConfigFileError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::MAX_RESULTS;
use crate::sources::GOOGLE_BOOKS_API;
use crate::utils::{default_user_agent, DEFAULT_TIMEOUT};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "BOOK_FINDER";

/// Config file name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "book-finder.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Remote catalog settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote catalog settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Volumes search endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Results requested per search (capped at 10)
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with each request
    #[serde(default = "default_agent")]
    pub user_agent: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            max_results: default_max_results(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_agent(),
        }
    }
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Result count after applying the hard cap
    pub fn effective_max_results(&self) -> usize {
        self.max_results.clamp(1, MAX_RESULTS)
    }
}

fn default_endpoint() -> String {
    GOOGLE_BOOKS_API.to_string()
}

fn default_max_results() -> usize {
    MAX_RESULTS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_agent() -> String {
    default_user_agent().to_string()
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when neither `-v` nor `RUST_LOG` is given
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "json" for structured output, anything else for plain text
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] config::ConfigError),
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Get the configuration from defaults and environment variables only
pub fn get_config() -> Result<Config, ConfigError> {
    let settings = config::Config::builder()
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Look for a config file in the usual places
///
/// Checks `./book-finder.toml`, then `<config dir>/book-finder/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("book-finder").join("config.toml"))
        .filter(|path| path.is_file())
}
