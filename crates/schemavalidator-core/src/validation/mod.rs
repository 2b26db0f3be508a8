//! Validation engine producing nested failure trees
//!
//! The engine checks a document against a schema and reports every
//! elementary failure. Failures raised inside combinators (`anyOf`, `oneOf`)
//! carry the failures of each attempted branch as children, which is what
//! the triage engine later ranks. Keyword evaluation itself is delegated to
//! the `jsonschema` crate; this module only reshapes its errors.
//!
//! Copyright (c) 2025 Schemavalidator Team
//! Licensed under the MIT license

pub mod draft4;
pub mod repr;

pub use draft4::Draft4Engine;

use crate::error::ValidatorResult;
use crate::loader::resolver::ReferenceResolver;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// One step of an instance or schema path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object member name
    Key(String),
    /// Array position
    Index(usize),
}

impl PathSegment {
    /// The member name, if this segment is a key
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathSegment::Key(key) => Some(key),
            PathSegment::Index(_) => None,
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(&repr::repr_str(key)),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// An elementary validation failure.
///
/// `path` and `schema_path` are relative to the parent failure (or to the
/// validation root for top-level failures); `context` holds the failures of
/// sub-schemas that were attempted and failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationFailure {
    /// Keyword that produced the failure
    pub keyword: String,
    /// Location in the document
    pub path: Vec<PathSegment>,
    /// Location of the failing rule in the schema
    pub schema_path: Vec<PathSegment>,
    /// Human-readable description
    pub message: String,
    /// Failures of attempted sub-schema branches
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<ValidationFailure>,
}

impl ValidationFailure {
    /// Create a failure located at the current instance and schema node
    pub fn new(keyword: &str, message: impl Into<String>) -> Self {
        Self {
            keyword: keyword.to_string(),
            path: Vec::new(),
            schema_path: Vec::new(),
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Attach branch failures
    pub fn with_context(mut self, context: Vec<ValidationFailure>) -> Self {
        self.context = context;
        self
    }

    /// Place the failure at `path` in the document and `schema_path` in the schema
    pub fn at(mut self, path: Vec<PathSegment>, schema_path: Vec<PathSegment>) -> Self {
        self.path = path;
        self.schema_path = schema_path;
        self
    }
}

/// Capability the registry needs from a schema validator
pub trait ValidationEngine {
    /// Check that `schema` is itself a structurally valid schema.
    ///
    /// Returns the meta-schema failures; empty means valid.
    fn check_schema(&self, schema: &Value) -> ValidatorResult<Vec<ValidationFailure>>;

    /// Validate `document` against `schema`, answering `$ref`s through `resolver`.
    ///
    /// Returns the top-level failures; empty means the document is valid.
    fn validate(
        &self,
        document: &Value,
        schema: &Value,
        resolver: Arc<dyn ReferenceResolver>,
    ) -> ValidatorResult<Vec<ValidationFailure>>;
}
