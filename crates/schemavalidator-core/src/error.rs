//! Error types for registry loading and document validation
//!
//! Copyright (c) 2025 Schemavalidator Team
//! Licensed under the MIT license

use crate::triage::TriageReport;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for registry and validation operations
pub type ValidatorResult<T> = Result<T, ValidatorError>;

/// Every failure the registry can surface to a caller.
///
/// Load-time variants (`SchemaOpenError` through `StrictnessFetchError`) abort
/// store construction; no partially built registry is ever returned.
#[derive(Error, Debug)]
pub enum ValidatorError {
    /// A schema file could not be read
    #[error("An error occurred while opening '{file}': {source}")]
    SchemaOpenError {
        file: PathBuf,
        source: std::io::Error,
    },

    /// A schema file is not well-formed JSON or YAML
    #[error("An error occurred while parsing '{file}': {reason}")]
    SchemaParseError { file: PathBuf, reason: String },

    /// A schema file parsed but is not a structurally valid Draft-4 schema
    #[error("'{file}' is not a valid schema: {reason}")]
    SchemaDefinitionError { file: PathBuf, reason: String },

    /// A schema file fails the configured strictness meta-schema
    #[error("'{file}' does not pass the strictness schema: {reason}")]
    SchemaStrictnessError { file: PathBuf, reason: String },

    /// The declared `id` of a schema file is missing or differs from its location
    #[error("'{file}' must declare id '{expected}', found {}", describe_found(.found))]
    SchemaIdentityError {
        file: PathBuf,
        expected: String,
        found: Option<String>,
    },

    /// The strictness meta-schema could not be fetched or compiled
    #[error("Failed to load strictness schema from '{uri}': {reason}")]
    StrictnessFetchError { uri: String, reason: String },

    /// No schema is registered under the requested identifier
    #[error("No schema found with id '{id}'")]
    UnknownSchemaError { id: String },

    /// A document does not satisfy a valid schema
    #[error("{message}")]
    SchemaValidationError {
        message: String,
        report: Box<TriageReport>,
    },

    /// The text handed to `validate_json_string` is not JSON
    #[error("Document is not valid JSON: {0}")]
    JsonParseError(#[source] serde_json::Error),

    /// Unexpected failure while resolving or validating
    #[error("Registry error: {reason}")]
    RegistryError { reason: String },
}

fn describe_found(found: &Option<String>) -> String {
    match found {
        Some(id) => format!("'{}'", id),
        None => "no id".to_string(),
    }
}

impl ValidatorError {
    /// Create an open error with file context
    pub fn open_error(file: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::SchemaOpenError {
            file: file.into(),
            source: error,
        }
    }

    /// Create a parse error with file context
    pub fn parse_error(file: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::SchemaParseError {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Create a schema definition error
    pub fn definition_error(file: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::SchemaDefinitionError {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Create a strictness error
    pub fn strictness_error(file: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::SchemaStrictnessError {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Create an identity error
    pub fn identity_error(
        file: impl Into<PathBuf>,
        expected: impl Into<String>,
        found: Option<String>,
    ) -> Self {
        Self::SchemaIdentityError {
            file: file.into(),
            expected: expected.into(),
            found,
        }
    }

    /// Create a strictness fetch error
    pub fn fetch_error(uri: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StrictnessFetchError {
            uri: uri.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown schema error
    pub fn unknown_schema(id: impl Into<String>) -> Self {
        Self::UnknownSchemaError { id: id.into() }
    }

    /// Create a validation error from a ranked report.
    ///
    /// Only the first line of the primary message is kept so that caller
    /// facing errors stay single-line.
    pub fn validation_error(message: &str, report: TriageReport) -> Self {
        let message = message.split('\n').next().unwrap_or_default().to_string();
        Self::SchemaValidationError {
            message,
            report: Box::new(report),
        }
    }

    /// Create a catch-all registry error
    pub fn registry_error(reason: impl Into<String>) -> Self {
        Self::RegistryError {
            reason: reason.into(),
        }
    }

    /// Get the schema file associated with this error, if any
    pub fn file(&self) -> Option<&Path> {
        match self {
            Self::SchemaOpenError { file, .. }
            | Self::SchemaParseError { file, .. }
            | Self::SchemaDefinitionError { file, .. }
            | Self::SchemaStrictnessError { file, .. }
            | Self::SchemaIdentityError { file, .. } => Some(file.as_path()),
            _ => None,
        }
    }

    /// The ranked diagnostics attached to a validation failure
    pub fn report(&self) -> Option<&TriageReport> {
        match self {
            Self::SchemaValidationError { report, .. } => Some(report.as_ref()),
            _ => None,
        }
    }

    /// Check whether this error happened while building the registry
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::SchemaOpenError { .. }
                | Self::SchemaParseError { .. }
                | Self::SchemaDefinitionError { .. }
                | Self::SchemaStrictnessError { .. }
                | Self::SchemaIdentityError { .. }
                | Self::StrictnessFetchError { .. }
        )
    }
}
