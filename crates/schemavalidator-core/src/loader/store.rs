//! In-memory schema registry built once from a directory tree
//!
//! Copyright (c) 2025 Schemavalidator Team
//! Licensed under the MIT license

use crate::error::{ValidatorError, ValidatorResult};
use crate::loader::parser::{Format, SchemaParser};
use crate::loader::resolver::normalize_id;
use crate::loader::strictness::StrictnessSchema;
use crate::validation::ValidationEngine;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Field every schema document uses to declare its own identifier
pub const ID_FIELD: &str = "id";

/// A parsed schema together with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    id: String,
    content: Value,
    origin: PathBuf,
}

impl SchemaDocument {
    /// Create a document; the identifier is normalized to absolute-path form
    pub fn new(id: &str, content: Value, origin: impl Into<PathBuf>) -> Self {
        Self {
            id: normalize_id(id),
            content,
            origin: origin.into(),
        }
    }

    /// Canonical registry identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Parsed schema content
    pub fn content(&self) -> &Value {
        &self.content
    }

    /// File the schema was loaded from
    pub fn origin(&self) -> &Path {
        &self.origin
    }
}

/// Immutable mapping from canonical identifier to schema document.
///
/// Nothing writes to a store after construction, so a shared reference can
/// be used from several threads at once.
#[derive(Debug, Clone, Default)]
pub struct SchemaStore {
    documents: BTreeMap<String, SchemaDocument>,
}

impl SchemaStore {
    /// Load every schema file below `root`.
    ///
    /// Files are processed in identifier order and each one must parse, be a
    /// valid schema, satisfy `strictness` when given, and declare an `id`
    /// equal to its canonical identifier. The first failure aborts the load.
    pub fn load<E>(
        root: &Path,
        engine: &E,
        strictness: Option<&StrictnessSchema>,
    ) -> ValidatorResult<Self>
    where
        E: ValidationEngine + ?Sized,
    {
        let parser = SchemaParser::new();
        let mut documents = BTreeMap::new();

        for (id, file) in discover(root)? {
            let content = parser.parse_file(&file)?;

            let failures = engine.check_schema(&content)?;
            if let Some(first) = failures.first() {
                return Err(ValidatorError::definition_error(&file, first.message.clone()));
            }

            if let Some(strictness) = strictness {
                strictness
                    .check(&content)
                    .map_err(|reason| ValidatorError::strictness_error(&file, reason))?;
            }

            match content.get(ID_FIELD).and_then(Value::as_str) {
                Some(declared) if declared == id => {}
                declared => {
                    return Err(ValidatorError::identity_error(
                        &file,
                        id,
                        declared.map(str::to_string),
                    ));
                }
            }

            debug!(id = %id, file = %file.display(), "Registered schema");
            documents.insert(id.clone(), SchemaDocument { id, content, origin: file });
        }

        info!(root = %root.display(), schemas = documents.len(), "Schema store built");
        Ok(Self { documents })
    }

    /// Build a store from already parsed documents, without load-time checks
    pub fn from_documents(documents: impl IntoIterator<Item = SchemaDocument>) -> Self {
        Self {
            documents: documents
                .into_iter()
                .map(|doc| (doc.id.clone(), doc))
                .collect(),
        }
    }

    /// Look up schema content; the key is normalized first
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.document(id).map(SchemaDocument::content)
    }

    /// Look up the full document; the key is normalized first
    pub fn document(&self, id: &str) -> Option<&SchemaDocument> {
        self.documents.get(&normalize_id(id))
    }

    /// Check if a schema is registered under `id`
    pub fn contains(&self, id: &str) -> bool {
        self.document(id).is_some()
    }

    /// All registered identifiers in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    /// Number of registered schemas
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if the store holds no schemas
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Canonical identifier of `file` relative to `root`: `/` + posix relative path
pub fn canonical_id(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let segments: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    format!("/{}", segments.join("/"))
}

/// Find all recognized schema files under `root`, sorted by identifier
pub fn discover(root: &Path) -> ValidatorResult<Vec<(String, PathBuf)>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            ValidatorError::open_error(path, std::io::Error::from(e))
        })?;

        if entry.file_type().is_file() && Format::from_path(entry.path()).is_some() {
            let path = entry.into_path();
            files.push((canonical_id(root, &path), path));
        }
    }

    files.sort();
    Ok(files)
}
