//! Configuration file generation.
//!
//! Writes a TOML rendering of a [`Config`] so users can start
//! from the defaults.
//!
//! # Configuration File Format
//!
//! ```toml
//! [catalog]
//! endpoint = "https://www.googleapis.com/books/v1/volumes"
//! max_results = 10
//! timeout_secs = 30
//! user_agent = "book-finder/0.1.0"
//!
//! [logging]
//! level = "warn"
//! format = "json"
//! ```

use std::path::Path;

use super::Config;

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),

    #[error("Refusing to overwrite existing file: {0}")]
    Exists(String),
}

impl Config {
    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, ConfigFileError> {
        toml::to_string_pretty(self).map_err(|e| ConfigFileError::Serialize(e.to_string()))
    }
}

/// Write `config` to `path` unless a file is already there
pub fn write_default_config(path: &Path, config: &Config) -> Result<(), ConfigFileError> {
    if path.exists() {
        return Err(ConfigFileError::Exists(path.display().to_string()));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
    }

    std::fs::write(path, config.to_toml()?).map_err(|e| ConfigFileError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use crate::config::tests::ENV_LOCK;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_load() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.catalog.endpoint = "http://127.0.0.1:1/volumes".to_string();
        config.logging.level = "debug".to_string();

        write_default_config(&path, &config).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.catalog.endpoint, "http://127.0.0.1:1/volumes");
        assert_eq!(loaded.logging.level, "debug");
    }

    #[test]
    fn test_does_not_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "# mine").unwrap();

        let result = write_default_config(&path, &Config::default());
        assert!(matches!(result, Err(ConfigFileError::Exists(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");
    }

    #[test]
    fn test_to_toml_has_sections() {
        let toml = Config::default().to_toml().unwrap();
        assert!(toml.contains("[catalog]"));
        assert!(toml.contains("[logging]"));
    }
}
