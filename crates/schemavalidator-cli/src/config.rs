//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Command-line arguments

use crate::error::{Error, Result};
use schemavalidator_core::{RelevanceWeights, ValidatorConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Registry settings
    pub registry: RegistryConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Registry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Directory the schema files live under
    pub schema_root: Option<PathBuf>,

    /// URI of the strictness meta-schema
    pub strictness_schema: Option<String>,

    /// Timeout in seconds for fetching the strictness meta-schema
    pub fetch_timeout_secs: u64,

    /// Relevance weights used to rank validation failures
    pub weights: RelevanceWeights,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no -v flag is given (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            schema_root: None,
            strictness_schema: None,
            fetch_timeout_secs: 10,
            weights: RelevanceWeights::default(),
        }
    }
}

impl RegistryConfig {
    /// Build the registry configuration, letting command-line values win.
    ///
    /// The registry root falls back to the current directory when neither
    /// the command line nor the config file names one.
    pub fn validator_config(
        &self,
        base_path: Option<&Path>,
        strictness_schema: Option<&str>,
    ) -> Result<ValidatorConfig> {
        let schema_root = match base_path.or(self.schema_root.as_deref()) {
            Some(root) => root.to_path_buf(),
            None => std::env::current_dir()?,
        };

        let mut config = ValidatorConfig::new(schema_root)
            .with_fetch_timeout(Duration::from_secs(self.fetch_timeout_secs))
            .with_weights(self.weights.clone());

        if let Some(uri) = strictness_schema.or(self.strictness_schema.as_deref()) {
            config = config.with_strictness_schema(uri);
        }

        Ok(config)
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config = match path.extension().and_then(|s| s.to_str()) {
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

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) => Self::from_file(path).map_err(|e| {
                Error::config(format!("failed to load {}: {}", path.display(), e))
            }),
            None => Self::load(),
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".schemavalidator.yaml"),
            PathBuf::from(".schemavalidator.yml"),
            PathBuf::from(".schemavalidator.json"),
            PathBuf::from(".schemavalidator.toml"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let app_dir = config_dir.join("schemavalidator");
            paths.push(app_dir.join("config.yaml"));
            paths.push(app_dir.join("config.json"));
            paths.push(app_dir.join("config.toml"));
        }

        paths
    }
}
