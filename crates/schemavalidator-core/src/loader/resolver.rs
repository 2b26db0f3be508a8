//! Identity resolution for cross-document `$ref`s
//!
//! Schemas refer to each other by registry identifier (`/common/address.json`)
//! rather than by file path or URL. The validation engine only sees the
//! [`ReferenceResolver`] capability, so every reference is answered from the
//! in-memory [`SchemaStore`] and never from the filesystem or network.
//!
//! Copyright (c) 2025 Schemavalidator Team
//! Licensed under the MIT license

use crate::error::{ValidatorError, ValidatorResult};
use crate::loader::store::SchemaStore;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Force the absolute-path form used as store key.
///
/// `"foo.json"`, `"/foo.json"` and `"//foo.json"` all normalize to `"/foo.json"`.
pub fn normalize_id(id: &str) -> String {
    format!("/{}", id.trim_start_matches('/'))
}

/// Capability handed to the validation engine for answering references.
///
/// Engines may hold on to a resolver while a compiled validator is alive, so
/// implementations are shared across threads.
pub trait ReferenceResolver: Send + Sync {
    /// The schema validation started from
    fn root(&self) -> &Value;

    /// Resolve a document url (fragment already stripped) to a schema.
    ///
    /// An empty url refers to the root schema.
    fn resolve_reference(&self, url: &str) -> ValidatorResult<&Value>;
}

/// Resolver bound to one store and one root schema for a single validate call
#[derive(Debug, Clone)]
pub struct StoreResolver {
    store: Arc<SchemaStore>,
    root: Value,
}

impl StoreResolver {
    /// Create a resolver over `store` for validations starting at `root`
    pub fn new(store: Arc<SchemaStore>, root: Value) -> Self {
        Self { store, root }
    }

    /// The store references are answered from
    pub fn store(&self) -> &SchemaStore {
        &self.store
    }
}

impl ReferenceResolver for StoreResolver {
    fn root(&self) -> &Value {
        &self.root
    }

    fn resolve_reference(&self, url: &str) -> ValidatorResult<&Value> {
        if url.is_empty() {
            return Ok(&self.root);
        }

        let id = normalize_id(url);
        self.store.get(&id).ok_or_else(|| {
            debug!(reference = url, id = %id, "Reference does not match any registered schema");
            ValidatorError::unknown_schema(id)
        })
    }
}
