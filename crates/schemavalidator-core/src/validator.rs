//! Registry facade
//!
//! [`SchemaValidator`] owns the schema store and ties loading, reference
//! resolution, validation and triage together behind three calls:
//! [`get_schema`](SchemaValidator::get_schema),
//! [`validate`](SchemaValidator::validate) and
//! [`validate_json_string`](SchemaValidator::validate_json_string).
//!
//! Copyright (c) 2025 Schemavalidator Team
//! Licensed under the MIT license

use crate::error::{ValidatorError, ValidatorResult};
use crate::loader::{normalize_id, SchemaStore, StoreResolver, StrictnessSchema, DEFAULT_FETCH_TIMEOUT};
use crate::triage::{RelevanceWeights, TriageReport};
use crate::validation::{Draft4Engine, ValidationEngine};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Registry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Directory the schema files live under
    pub schema_root: PathBuf,
    /// URI of an optional strictness meta-schema
    pub strictness_schema: Option<String>,
    /// Bound on fetching the strictness meta-schema
    #[serde(rename = "fetch_timeout_secs", with = "duration_secs")]
    pub fetch_timeout: Duration,
    /// Relevance weights for ranking failures
    pub weights: RelevanceWeights,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            schema_root: PathBuf::from("schemas/"),
            strictness_schema: None,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            weights: RelevanceWeights::default(),
        }
    }
}

impl ValidatorConfig {
    /// Configuration for a registry rooted at `schema_root`
    pub fn new(schema_root: impl Into<PathBuf>) -> Self {
        Self {
            schema_root: schema_root.into(),
            ..Self::default()
        }
    }

    /// Require every schema to pass the strictness meta-schema at `uri`
    pub fn with_strictness_schema(mut self, uri: impl Into<String>) -> Self {
        self.strictness_schema = Some(uri.into());
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_weights(mut self, weights: RelevanceWeights) -> Self {
        self.weights = weights;
        self
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

/// The schema to validate against: a registry identifier or a schema value
#[derive(Debug, Clone, Copy)]
pub enum SchemaSource<'a> {
    Id(&'a str),
    Schema(&'a Value),
}

impl<'a> From<&'a str> for SchemaSource<'a> {
    fn from(id: &'a str) -> Self {
        SchemaSource::Id(id)
    }
}

impl<'a> From<&'a String> for SchemaSource<'a> {
    fn from(id: &'a String) -> Self {
        SchemaSource::Id(id)
    }
}

impl<'a> From<&'a Value> for SchemaSource<'a> {
    fn from(schema: &'a Value) -> Self {
        SchemaSource::Schema(schema)
    }
}

/// Schema registry and document validator
#[derive(Debug)]
pub struct SchemaValidator<E = Draft4Engine> {
    store: Arc<SchemaStore>,
    engine: E,
    weights: RelevanceWeights,
}

impl SchemaValidator<Draft4Engine> {
    /// Load the registry described by `config` with the Draft-4 engine
    pub fn new(config: ValidatorConfig) -> ValidatorResult<Self> {
        Self::with_engine(config, Draft4Engine::new())
    }

    /// Wrap an already built store
    pub fn from_store(store: SchemaStore) -> Self {
        Self {
            store: Arc::new(store),
            engine: Draft4Engine::new(),
            weights: RelevanceWeights::default(),
        }
    }
}

impl<E: ValidationEngine> SchemaValidator<E> {
    /// Load the registry described by `config`, validating with `engine`.
    ///
    /// The strictness meta-schema, when configured, is fetched before any
    /// schema file is read. Any failure aborts construction.
    pub fn with_engine(config: ValidatorConfig, engine: E) -> ValidatorResult<Self> {
        let strictness = config
            .strictness_schema
            .as_deref()
            .map(|uri| StrictnessSchema::fetch(uri, config.fetch_timeout))
            .transpose()?;

        let store = SchemaStore::load(&config.schema_root, &engine, strictness.as_ref())?;
        info!(
            root = %config.schema_root.display(),
            schemas = store.len(),
            strict = strictness.is_some(),
            "Schema validator ready"
        );

        Ok(Self {
            store: Arc::new(store),
            engine,
            weights: config.weights,
        })
    }

    /// Replace the relevance weights used for ranking
    pub fn with_weights(mut self, weights: RelevanceWeights) -> Self {
        self.weights = weights;
        self
    }

    /// The loaded registry
    pub fn store(&self) -> &SchemaStore {
        &self.store
    }

    /// Look up a schema; `"foo.json"` and `"/foo.json"` are the same key
    pub fn get_schema(&self, id: &str) -> ValidatorResult<&Value> {
        self.store
            .get(id)
            .ok_or_else(|| ValidatorError::unknown_schema(normalize_id(id)))
    }

    /// Validate and return the ranked report; an empty report means valid
    pub fn triage<'a>(
        &'a self,
        document: &Value,
        schema: impl Into<SchemaSource<'a>>,
    ) -> ValidatorResult<TriageReport> {
        let schema = match schema.into() {
            SchemaSource::Id(id) => self.get_schema(id)?,
            SchemaSource::Schema(schema) => schema,
        };

        let resolver = StoreResolver::new(Arc::clone(&self.store), schema.clone());
        let failures = self.engine.validate(document, schema, Arc::new(resolver))?;
        Ok(TriageReport::new(&failures, &self.weights))
    }

    /// Validate `document`.
    ///
    /// On failure the error carries the first line of the most relevant
    /// failure's message and the full ranked report.
    pub fn validate<'a>(
        &'a self,
        document: &Value,
        schema: impl Into<SchemaSource<'a>>,
    ) -> ValidatorResult<()> {
        let report = self.triage(document, schema)?;

        let Some(primary) = report.primary() else {
            return Ok(());
        };
        let message = primary.failure.message.clone();

        debug!(failures = report.len(), "Document failed validation:{}", report.table());
        Err(ValidatorError::validation_error(&message, report))
    }

    /// Parse `text` as JSON, then validate it against the schema `schema_id`
    pub fn validate_json_string(&self, text: &str, schema_id: &str) -> ValidatorResult<()> {
        let document: Value = serde_json::from_str(text).map_err(ValidatorError::JsonParseError)?;
        self.validate(&document, schema_id)
    }
}
