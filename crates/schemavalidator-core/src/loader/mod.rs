//! Schema registry loading
//!
//! This module builds the schema registry at startup:
//! - JSON and YAML schema parsing
//! - Recursive discovery below a registry root
//! - Load-time consistency checks (schema validity, strictness, identity)
//! - Identity resolution of `$ref`s against the loaded store
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use schemavalidator_core::loader::SchemaStore;
//! use schemavalidator_core::validation::Draft4Engine;
//! use std::path::Path;
//!
//! let store = SchemaStore::load(Path::new("schemas"), &Draft4Engine::new(), None)?;
//! for id in store.ids() {
//!     println!("{}", id);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Schemavalidator Team
//! Licensed under the MIT license

pub mod parser;
pub mod resolver;
pub mod store;
pub mod strictness;

pub use parser::{Format, SchemaParser};
pub use resolver::{normalize_id, ReferenceResolver, StoreResolver};
pub use store::{canonical_id, discover, SchemaDocument, SchemaStore, ID_FIELD};
pub use strictness::{StrictnessSchema, DEFAULT_FETCH_TIMEOUT};
