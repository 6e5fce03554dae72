// Global configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::DEFAULT_DIR_PLACEHOLDER;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chapters: ChaptersConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChaptersConfig {
    /// Directory for chapter-name CSV files (system temp directory when unset)
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Output directory used by auto naming when the destination has none
    #[serde(default = "default_destination_dir")]
    pub destination_dir: String,

    /// Derive the destination name from source, title and chapters
    #[serde(default)]
    pub auto_name: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of: error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_destination_dir() -> String {
    DEFAULT_DIR_PLACEHOLDER.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            destination_dir: default_destination_dir(),
            auto_name: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "macos") {
            dirs::home_dir()
                .context("Could not determine home directory")?
                .join(".config")
                .join("hbquery")
        } else {
            dirs::config_dir()
                .context("Could not determine config directory")?
                .join("hbquery")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from disk, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `config_path`, writing defaults there when missing.
    ///
    /// A default config that can't be written is an error; callers that can
    /// live with built-in defaults fall back to `Config::default()`.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path).with_context(|| {
                format!("Failed to read config file: {}", config_path.display())
            })?;

            let config: Config = toml::from_str(&contents).with_context(|| {
                format!("Failed to parse config file: {}", config_path.display())
            })?;

            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(config_path).context(
                "Could not create default config file. Run 'hbquery init-config' to create one",
            )?;
            Ok(config)
        }
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    /// Directory chapter CSV files are written to
    pub fn temp_dir(&self) -> PathBuf {
        self.chapters
            .temp_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }

    /// Parsed `logging.level`, falling back to WARN for unknown names
    pub fn log_level(&self) -> tracing::Level {
        self.logging
            .level
            .parse()
            .unwrap_or(tracing::Level::WARN)
    }
}
