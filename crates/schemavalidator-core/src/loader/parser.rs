//! Schema parsing for JSON and YAML files
//!
//! Copyright (c) 2025 Schemavalidator Team
//! Licensed under the MIT license

use crate::error::{ValidatorError, ValidatorResult};
use serde_json::Value;
use std::path::Path;

/// Supported file formats for schema documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension, `None` for unrecognized files
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension().and_then(|ext| ext.to_str())?;
        match extension.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            _ => None,
        }
    }

    /// Get file extensions for this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Format::Yaml => &["yaml", "yml"],
            Format::Json => &["json"],
        }
    }
}

/// Stateless parser turning schema files into JSON values
#[derive(Debug, Default)]
pub struct SchemaParser;

impl SchemaParser {
    /// Create a new schema parser
    pub fn new() -> Self {
        Self
    }

    /// Read and parse a schema file, detecting format from its extension
    pub fn parse_file(&self, path: &Path) -> ValidatorResult<Value> {
        let format = Format::from_path(path).unwrap_or(Format::Json);
        let content =
            std::fs::read_to_string(path).map_err(|e| ValidatorError::open_error(path, e))?;

        self.parse_content(&content, format, path)
    }

    /// Parse schema content with explicit format
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> ValidatorResult<Value> {
        match format {
            Format::Yaml => self.parse_yaml(content, path),
            Format::Json => self.parse_json(content, path),
        }
    }

    /// Parse YAML content
    pub fn parse_yaml(&self, content: &str, path: &Path) -> ValidatorResult<Value> {
        // Go through serde_yaml::Value first so YAML syntax errors keep their location
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| ValidatorError::parse_error(path, e.to_string()))?;

        serde_json::to_value(yaml_value)
            .map_err(|e| ValidatorError::parse_error(path, e.to_string()))
    }

    /// Parse JSON content
    pub fn parse_json(&self, content: &str, path: &Path) -> ValidatorResult<Value> {
        serde_json::from_str(content).map_err(|e| ValidatorError::parse_error(path, e.to_string()))
    }
}
