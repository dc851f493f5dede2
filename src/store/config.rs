//! Configuration handling for Basket
//!
//! Configuration lives in `~/.config/basket/config.toml` (per the platform
//! config dir); the history document defaults to the platform data dir,
//! e.g. `~/.local/share/basket/history.json`. Both can be overridden.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Could not determine a home directory for this platform")]
    NoHomeDir,
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Override for the history file location
    pub history_file: Option<PathBuf>,

    /// Default number of lists shown by `basket recent`
    pub recent_count: usize,

    /// Number of products reported in statistics
    pub top_products: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_file: None,
            recent_count: 10,
            top_products: 10,
        }
    }
}

impl Config {
    /// Loads the global config, falling back to defaults when no file exists
    pub fn load() -> Result<Self> {
        let Some(dirs) = ProjectDirs::from("", "", "basket") else {
            return Err(ConfigError::NoHomeDir.into());
        };

        let path = dirs.config_dir().join("config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;

        Ok(config)
    }

    /// Resolves the history file path: CLI override, then config, then the
    /// platform data dir default.
    pub fn resolve_history_file(&self, cli_override: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = cli_override {
            return Ok(path);
        }
        if let Some(path) = &self.history_file {
            return Ok(path.clone());
        }

        let dirs = ProjectDirs::from("", "", "basket").ok_or(ConfigError::NoHomeDir)?;
        Ok(dirs.data_dir().join("history.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.recent_count, 10);
        assert_eq!(config.top_products, 10);
        assert!(config.history_file.is_none());
    }

    #[test]
    fn parse_partial_config() {
        let config: Config = toml::from_str("recent_count = 5").unwrap();
        assert_eq!(config.recent_count, 5);
        assert_eq!(config.top_products, 10);
    }

    #[test]
    fn parse_full_config() {
        let config: Config = toml::from_str(
            r#"
history_file = "/tmp/history.json"
recent_count = 3
top_products = 5
"#,
        )
        .unwrap();
        assert_eq!(config.history_file, Some(PathBuf::from("/tmp/history.json")));
        assert_eq!(config.recent_count, 3);
        assert_eq!(config.top_products, 5);
    }

    #[test]
    fn cli_override_wins() {
        let config = Config {
            history_file: Some(PathBuf::from("/from/config.json")),
            ..Config::default()
        };

        let resolved = config
            .resolve_history_file(Some(PathBuf::from("/from/cli.json")))
            .unwrap();
        assert_eq!(resolved, PathBuf::from("/from/cli.json"));
    }

    #[test]
    fn config_file_beats_default() {
        let config = Config {
            history_file: Some(PathBuf::from("/from/config.json")),
            ..Config::default()
        };

        let resolved = config.resolve_history_file(None).unwrap();
        assert_eq!(resolved, PathBuf::from("/from/config.json"));
    }
}
