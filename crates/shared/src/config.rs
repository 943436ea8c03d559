//! Configuration management for the converter.
//!
//! This module handles loading and parsing configuration from TOML files,
//! with sensible defaults for all settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input/output file locations
    pub files: FilesConfig,

    /// Export header settings
    pub export: ExportConfig,

    /// Title resolution settings
    pub resolver: ResolverConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// File locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Source JSON export
    pub input: String,

    /// MAL XML import document to write
    pub output: String,

    /// Unresolved-title log, written only when titles were skipped
    pub skip_log: String,
}

/// Export header configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// MAL username stamped into the myinfo header
    pub user_name: String,
}

/// Title resolution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Jikan API base URL
    pub base_url: String,

    /// Politeness delay after each successful match, in milliseconds
    pub delay_ms: u64,

    /// Total search attempts per title (first try included)
    pub max_attempts: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log directory path
    pub log_dir: String,

    /// Default log level (trace, debug, info, warn, error)
    pub default_level: String,

    /// Enable console output
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

impl ResolverConfig {
    /// Politeness delay as a `Duration`
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl LoggingConfig {
    /// Parsed log level, falling back to INFO on an invalid value
    pub fn level(&self) -> tracing::Level {
        self.default_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            files: FilesConfig {
                input: "export.json".to_string(),
                output: "convert.xml".to_string(),
                skip_log: "skipped_titles.txt".to_string(),
            },
            export: ExportConfig {
                user_name: "your_username".to_string(),
            },
            resolver: ResolverConfig {
                base_url: "https://api.jikan.moe/v4".to_string(),
                delay_ms: 1500,
                max_attempts: 3,
            },
            logging: LoggingConfig {
                log_dir: "logs".to_string(),
                default_level: "info".to_string(),
                console: true,
                file: false,
                json_format: false,
            },
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// If the file doesn't exist, returns the default configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Load configuration from a TOML file or fall back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::from_file(path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load config, using defaults");
            Self::default()
        })
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration saved successfully"
        );

        Ok(())
    }

    /// Path of the source JSON export
    pub fn input_path(&self) -> PathBuf {
        PathBuf::from(&self.files.input)
    }

    /// Path of the XML import document to write
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.files.output)
    }

    /// Path of the skipped-titles log
    pub fn skip_log_path(&self) -> PathBuf {
        PathBuf::from(&self.files.skip_log)
    }

    /// Path of the log directory
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.logging.log_dir)
    }
}
