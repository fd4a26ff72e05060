//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Environment variables (including a `.env` file)
//! - Command-line arguments

use crate::cli::OutputFormat;
use crate::error::{Error, ErrorContext, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;
use utmkit_core::{Channel, ValidationMode};

/// Environment variables that override file settings
pub const ENV_OVERRIDES: [&str; 5] = [
    "UTMKIT_BASE_URL",
    "UTMKIT_MODE",
    "UTMKIT_LICENSES_FILE",
    "UTMKIT_LIBRARY_FILE",
    "UTMKIT_OUTPUT_FORMAT",
];

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Values used when a command leaves them out
    pub defaults: DefaultsConfig,

    /// Data files
    pub data: DataConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Command defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Landing page used by `build`
    pub base_url: Option<String>,

    /// Campaign rule set used by `validate` and `check`
    pub mode: ValidationMode,

    /// Marketing channel used by `build`
    pub channel: Option<String>,
}

/// Data file locations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// License catalog (JSON, flat or grouped by category)
    pub licenses_file: Option<PathBuf>,

    /// Campaign library (JSON array)
    pub library_file: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: String,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no -v flag is given
    pub level: String,

    /// Log format (compact, full, json)
    pub format: String,

    /// Log file path
    pub file: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;

        let config = match extension(path) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in &Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        // Return default config if no config file found
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations,
    /// then apply environment overrides
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = file {
            Self::from_file(path)?
        } else {
            Self::load()?
        };

        config.apply_env()?;
        Ok(config)
    }

    /// Get default configuration file paths to check
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Current directory
        for stem in [".utmkit", "utmkit"] {
            for ext in ["yaml", "json", "toml"] {
                paths.push(PathBuf::from(format!("{}.{}", stem, ext)));
            }
        }

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            let utmkit_dir = config_dir.join("utmkit");
            for ext in ["yaml", "json", "toml"] {
                paths.push(utmkit_dir.join(format!("config.{}", ext)));
            }
        }

        paths
    }

    /// Path used by `config init --user`
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("utmkit").join("config.toml"))
    }

    /// First existing file among the default locations
    pub fn find_config_file() -> Option<PathBuf> {
        Self::default_config_paths().into_iter().find(|p| p.exists())
    }

    /// Apply `UTMKIT_*` environment overrides
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(base_url) = lookup("UTMKIT_BASE_URL") {
            self.defaults.base_url = Some(base_url);
        }
        if let Some(mode) = lookup("UTMKIT_MODE") {
            self.defaults.mode = mode
                .parse::<ValidationMode>()
                .map_err(|e| Error::config(format!("UTMKIT_MODE: {}", e)))?;
        }
        if let Some(file) = lookup("UTMKIT_LICENSES_FILE") {
            self.data.licenses_file = Some(PathBuf::from(file));
        }
        if let Some(file) = lookup("UTMKIT_LIBRARY_FILE") {
            self.data.library_file = Some(PathBuf::from(file));
        }
        if let Some(format) = lookup("UTMKIT_OUTPUT_FORMAT") {
            self.output.format = format;
        }
        Ok(())
    }

    /// Output format named in the config
    pub fn output_format(&self) -> Result<OutputFormat> {
        OutputFormat::from_str(&self.output.format, true).map_err(|_| {
            Error::config(format!("Unknown output format: {}", self.output.format))
        })
    }

    /// Check that the configured values are usable
    pub fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.defaults.base_url {
            Url::parse(base_url).map_err(|e| {
                Error::config(format!("defaults.base_url '{}' is not a valid URL: {}", base_url, e))
            })?;
        }

        if let Some(channel) = &self.defaults.channel {
            Channel::lookup(channel)?;
        }

        let files = [
            ("data.licenses_file", &self.data.licenses_file),
            ("data.library_file", &self.data.library_file),
        ];
        for (key, file) in files {
            if let Some(path) = file {
                if !path.exists() {
                    return Err(Error::config(format!(
                        "{} points to a missing file: {}",
                        key,
                        path.display()
                    )));
                }
            }
        }

        self.output_format()?;

        if !matches!(self.logging.format.as_str(), "compact" | "full" | "json") {
            return Err(Error::config(format!(
                "Unknown log format: {} (expected compact, full or json)",
                self.logging.format
            )));
        }

        Ok(())
    }

    /// Get a configuration value by key path
    pub fn get(&self, key: &str) -> Result<String> {
        let display = |path: &Option<PathBuf>| {
            path.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        };

        match key {
            "defaults.base_url" => Ok(self.defaults.base_url.clone().unwrap_or_default()),
            "defaults.mode" => Ok(self.defaults.mode.to_string()),
            "defaults.channel" => Ok(self.defaults.channel.clone().unwrap_or_default()),
            "data.licenses_file" => Ok(display(&self.data.licenses_file)),
            "data.library_file" => Ok(display(&self.data.library_file)),
            "output.format" => Ok(self.output.format.clone()),
            "output.color" => Ok(self.output.color.to_string()),
            "logging.level" => Ok(self.logging.level.clone()),
            "logging.format" => Ok(self.logging.format.clone()),
            "logging.file" => Ok(display(&self.logging.file)),
            _ => Err(Error::config(format!("Unknown configuration key: {}", key))),
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match extension(path) {
            Some("yaml") | Some("yml") => serde_yaml::to_string(self)?,
            Some("json") => serde_json::to_string_pretty(self)?,
            _ => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content).context("Failed to write configuration file")?;
        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|s| s.to_str())
}
