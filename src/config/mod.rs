//! # Configuration Management Module
//!
//! Settings for the seeding tool, read from a TOML file (`config.toml` unless `--config`
//! points elsewhere).
//!
//! ## Configuration Structure
//!
//! - [`TournamentConfig`] - name used for fresh state and reset
//! - [`StorageConfig`] - where the snapshot and exports live
//! - [`ImagesConfig`] - upload limits
//! - [`LoggingConfig`] - log level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use starchseed::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Config::create_default("config.toml").await?;
//!     let config = Config::load("config.toml").await?;
//!     println!("Tournament: {}", config.tournament.default_name);
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [tournament]
//! default_name = "Starch Madness 2026"
//!
//! [storage]
//! data_dir = "./data"
//! state_file = "starch-madness-seeding.json"
//! export_dir = "./exports"
//!
//! [images]
//! max_upload_bytes = 500000
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every section and key is optional; missing values take the defaults shown above.

use crate::state::DEFAULT_TOURNAMENT_NAME;
use crate::storage::DEFAULT_STATE_FILE;
use crate::validation::DEFAULT_MAX_IMAGE_BYTES;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tournament: TournamentConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub images: ImagesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Name given to fresh state and restored by reset.
    #[serde(default = "default_tournament_name")]
    pub default_name: String,
}

fn default_tournament_name() -> String {
    DEFAULT_TOURNAMENT_NAME.to_string()
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            default_name: default_tournament_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_state_file")]
    pub state_file: String,
    /// Directory export files are written to when no explicit path is given.
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_state_file() -> String {
    DEFAULT_STATE_FILE.to_string()
}

fn default_export_dir() -> String {
    "./exports".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            state_file: default_state_file(),
            export_dir: default_export_dir(),
        }
    }
}

impl StorageConfig {
    pub fn state_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.state_file)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

fn default_max_upload_bytes() -> u64 {
    DEFAULT_MAX_IMAGE_BYTES
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        if config.tournament.default_name.trim().is_empty() {
            return Err(anyhow!(
                "Config file {}: tournament.default_name must not be empty",
                path
            ));
        }

        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tournament.default_name, "Starch Madness 2026");
        assert_eq!(config.storage.data_dir, "./data");
        assert_eq!(config.storage.state_file, "starch-madness-seeding.json");
        assert_eq!(config.images.max_upload_bytes, 500_000);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [tournament]
            default_name = "Carb Cup"

            [images]
            max_upload_bytes = 1024
            "#,
        )
        .unwrap();
        assert_eq!(config.tournament.default_name, "Carb Cup");
        assert_eq!(config.images.max_upload_bytes, 1024);
        assert_eq!(config.storage.export_dir, "./exports");
        assert_eq!(
            config.storage.state_path(),
            Path::new("./data").join("starch-madness-seeding.json")
        );
    }

    #[tokio::test]
    async fn test_create_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        let path = path.to_str().unwrap();
        Config::create_default(path).await.unwrap();
        let config = Config::load(path).await.unwrap();
        assert_eq!(config.tournament.default_name, "Starch Madness 2026");
        assert!(Config::load("/nonexistent/config.toml").await.is_err());
    }

    #[tokio::test]
    async fn test_empty_default_name_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[tournament]\ndefault_name = \"  \"\n").unwrap();
        assert!(Config::load(path.to_str().unwrap()).await.is_err());
    }
}
