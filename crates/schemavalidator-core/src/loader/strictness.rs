//! Organization-defined strictness meta-schema
//!
//! The strictness schema is fetched once, compiled, and then every registered
//! schema document must satisfy it on top of bare Draft-4 validity. Any
//! failure to obtain it is fatal: the registry state would be undefined.
//!
//! Copyright (c) 2025 Schemavalidator Team
//! Licensed under the MIT license

use crate::error::{ValidatorError, ValidatorResult};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Default bound on the strictness schema download
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// A compiled strictness meta-schema
pub struct StrictnessSchema {
    uri: String,
    validator: jsonschema::Validator,
}

impl StrictnessSchema {
    /// Fetch the schema at `uri` and compile it.
    ///
    /// `http://` and `https://` URIs are downloaded; `file://` URIs and plain
    /// paths are read from disk.
    pub fn fetch(uri: &str, timeout: Duration) -> ValidatorResult<Self> {
        let schema = if uri.starts_with("http://") || uri.starts_with("https://") {
            fetch_remote(uri, timeout)?
        } else {
            let path = uri.strip_prefix("file://").unwrap_or(uri);
            read_local(uri, Path::new(path))?
        };

        let strictness = Self::compile(uri, &schema)?;
        info!(uri = uri, "Strictness schema loaded");
        Ok(strictness)
    }

    /// Compile an already obtained strictness schema
    pub fn compile(uri: &str, schema: &Value) -> ValidatorResult<Self> {
        let validator = jsonschema::draft4::new(schema)
            .map_err(|e| ValidatorError::fetch_error(uri, e.to_string()))?;

        Ok(Self {
            uri: uri.to_string(),
            validator,
        })
    }

    /// Where the schema was loaded from
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Check a schema document, returning the first violation
    pub fn check(&self, document: &Value) -> Result<(), String> {
        self.validator.validate(document).map_err(|e| e.to_string())
    }
}

impl fmt::Debug for StrictnessSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrictnessSchema")
            .field("uri", &self.uri)
            .finish_non_exhaustive()
    }
}

fn fetch_remote(uri: &str, timeout: Duration) -> ValidatorResult<Value> {
    debug!(uri = uri, timeout_ms = timeout.as_millis() as u64, "Fetching strictness schema");

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ValidatorError::fetch_error(uri, e.to_string()))?;

    let response = client
        .get(uri)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(|e| ValidatorError::fetch_error(uri, e.to_string()))?;

    let body = response
        .text()
        .map_err(|e| ValidatorError::fetch_error(uri, e.to_string()))?;

    serde_json::from_str(&body).map_err(|e| ValidatorError::fetch_error(uri, e.to_string()))
}

fn read_local(uri: &str, path: &Path) -> ValidatorResult<Value> {
    debug!(path = %path.display(), "Reading strictness schema");

    let content = std::fs::read_to_string(path)
        .map_err(|e| ValidatorError::fetch_error(uri, e.to_string()))?;

    serde_json::from_str(&content).map_err(|e| ValidatorError::fetch_error(uri, e.to_string()))
}
