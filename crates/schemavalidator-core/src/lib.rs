//! Schemavalidator Core - local JSON Schema registry with ranked diagnostics
//!
//! This crate loads a directory of interrelated Draft-4 schemas into an
//! immutable registry and validates documents against them:
//! - **Schema Store**: every schema file below a root, keyed by its canonical
//!   identifier (`/` + path relative to the root)
//! - **Identity Resolution**: `$ref`s are answered from the store, never from
//!   the filesystem or the network
//! - **Error Triage**: nested failures are flattened, scored for relevance and
//!   ranked so the most actionable one is reported first
//!
//! ## Load-time checks
//!
//! Each schema file must parse, be a valid Draft-4 schema, pass the optional
//! strictness meta-schema, and declare an `id` equal to its canonical
//! identifier. The first violation aborts loading; a partially built registry
//! is never returned.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use schemavalidator_core::{SchemaValidator, ValidatorConfig, ValidatorError};
//! use serde_json::json;
//!
//! let validator = SchemaValidator::new(ValidatorConfig::new("schemas/"))?;
//!
//! match validator.validate(&json!({"name": "Ada"}), "person.json") {
//!     Ok(()) => println!("OK"),
//!     Err(ValidatorError::SchemaValidationError { message, report }) => {
//!         println!("Error: {}", message);
//!         println!("{}", report.table());
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Schemavalidator Team
//! Licensed under the MIT license

pub mod error;
pub mod loader;
pub mod triage;
pub mod validation;
pub mod validator;

pub use error::{ValidatorError, ValidatorResult};
pub use loader::{normalize_id, ReferenceResolver, SchemaDocument, SchemaStore, StoreResolver};
pub use triage::{RelevanceWeights, ScoredFailure, TriageReport, NO_ADDITIONAL_INFO};
pub use validation::{Draft4Engine, PathSegment, ValidationEngine, ValidationFailure};
pub use validator::{SchemaSource, SchemaValidator, ValidatorConfig};
