//! Settings file and on-disk locations
//!
//! The portal keeps everything under one directory: `config.toml` (optional),
//! the SQLite database and the log file.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod db;
pub mod migrations;

const APP_DIR: &str = "unex-portal";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Seconds between automatic banner advances on the home page
    #[serde(default = "default_banner_interval_secs")]
    pub banner_interval_secs: u64,

    /// Frame budget of the UI loop
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    #[serde(default)]
    pub log_file: Option<PathBuf>,

    #[serde(default)]
    pub database: Option<PathBuf>,
}

fn default_banner_interval_secs() -> u64 {
    5
}

fn default_tick_rate_ms() -> u64 {
    16
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            banner_interval_secs: default_banner_interval_secs(),
            tick_rate_ms: default_tick_rate_ms(),
            log_file: None,
            database: None,
        }
    }
}

impl PortalConfig {
    /// Directory holding the settings file, database and log
    ///
    /// `$XDG_CONFIG_HOME/unex-portal` on Linux, `~/.unex-portal` elsewhere.
    /// Created on first use.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join(APP_DIR)
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(format!(".{}", APP_DIR))
        };

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            info!("Created config directory: {:?}", config_dir);
        }

        Ok(config_dir)
    }

    /// Load settings from `path`, or from `config.toml` in the config dir
    ///
    /// An explicit path must exist. The default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default_path = Self::config_dir()?.join("config.toml");
                if !default_path.exists() {
                    debug!("No config file at {:?}, using defaults", default_path);
                    return Ok(Self::default());
                }
                default_path
            }
        };

        debug!("Loading config from: {:?}", config_path);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        if config.banner_interval_secs == 0 {
            anyhow::bail!("banner_interval_secs must be at least 1");
        }
        Ok(config)
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("portal.db")),
        }
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("unex-portal.log")),
        }
    }

    pub fn banner_interval(&self) -> Duration {
        Duration::from_secs(self.banner_interval_secs)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = PortalConfig::parse("").unwrap();
        assert_eq!(config, PortalConfig::default());
        assert_eq!(config.banner_interval(), Duration::from_secs(5));
        assert_eq!(config.tick_rate(), Duration::from_millis(16));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = PortalConfig::parse("banner_interval_secs = 8\ndatabase = \"/tmp/p.db\"").unwrap();
        assert_eq!(config.banner_interval_secs, 8);
        assert_eq!(config.tick_rate_ms, 16);
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/p.db"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(PortalConfig::parse("banner_interval_secs = 0").is_err());
        assert!(PortalConfig::parse("banner_interval_secs = \"five\"").is_err());
    }

    #[test]
    fn test_explicit_path_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "tick_rate_ms = 33\nlog_file = \"/tmp/portal.log\"").unwrap();

        let config = PortalConfig::load(Some(&path)).unwrap();
        assert_eq!(config.tick_rate_ms, 33);
        assert_eq!(config.log_path().unwrap(), PathBuf::from("/tmp/portal.log"));
    }

    #[test]
    fn test_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = PortalConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
