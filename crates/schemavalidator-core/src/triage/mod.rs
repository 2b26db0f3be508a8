//! Error triage engine
//!
//! Turns the nested failure tree of one validate call into a ranked list:
//! the tree is flattened, every failure is scored for relevance, and the
//! list is sorted most relevant first. The first entry becomes the error a
//! caller sees; the full list renders as a diagnostic table.
//!
//! Copyright (c) 2025 Schemavalidator Team
//! Licensed under the MIT license

pub mod flatten;
pub mod relevance;
pub mod table;

pub use flatten::{flatten, FlatFailure};
pub use relevance::{rank, score, RelevanceTable, RelevanceWeights, ScoredFailure};
pub use table::{format_path, format_table, NO_ADDITIONAL_INFO};

use crate::validation::ValidationFailure;
use serde::Serialize;
use table::{INSTANCE_ROOT, SCHEMA_ROOT};

/// Ranked diagnostics for one validate call; empty means success
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TriageReport {
    failures: Vec<ScoredFailure>,
}

impl TriageReport {
    /// Flatten, score and rank a failure tree
    pub fn new(failures: &[ValidationFailure], weights: &RelevanceWeights) -> Self {
        Self {
            failures: rank(flatten(failures), weights),
        }
    }

    /// All failures, most relevant first
    pub fn failures(&self) -> &[ScoredFailure] {
        &self.failures
    }

    /// The most relevant failure
    pub fn primary(&self) -> Option<&ScoredFailure> {
        self.failures.first()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Table rows: schema path, instance path, message
    pub fn rows(&self) -> Vec<[String; 3]> {
        self.failures
            .iter()
            .map(|scored| {
                [
                    format_path(&scored.failure.schema_path, SCHEMA_ROOT),
                    format_path(&scored.failure.path, INSTANCE_ROOT),
                    scored.failure.message.clone(),
                ]
            })
            .collect()
    }

    /// Render the box-drawing table
    pub fn table(&self) -> String {
        format_table(&self.rows())
    }
}

/// Build the ranked report for a failure tree
pub fn triage(failures: &[ValidationFailure], weights: &RelevanceWeights) -> TriageReport {
    TriageReport::new(failures, weights)
}
