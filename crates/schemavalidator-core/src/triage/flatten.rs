//! Failure tree flattening
//!
//! Copyright (c) 2025 Schemavalidator Team
//! Licensed under the MIT license

use crate::validation::{PathSegment, ValidationFailure};
use serde::Serialize;

/// A failure lifted out of the tree, with paths made absolute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatFailure {
    /// Keyword that produced the failure
    pub keyword: String,
    /// Location in the document, from the document root
    pub path: Vec<PathSegment>,
    /// Location of the failing rule, from the schema root
    pub schema_path: Vec<PathSegment>,
    /// Human-readable description
    pub message: String,
}

/// Flatten a failure tree with an explicit LIFO stack.
///
/// The stack starts as the top-level failures; each popped failure is
/// recorded and its children are pushed. Deep schemas never grow the call
/// stack, and the resulting order is what ranking ties fall back to.
pub fn flatten(failures: &[ValidationFailure]) -> Vec<FlatFailure> {
    let mut stack: Vec<(&ValidationFailure, Vec<PathSegment>, Vec<PathSegment>)> = failures
        .iter()
        .map(|failure| (failure, failure.path.clone(), failure.schema_path.clone()))
        .collect();
    let mut flat = Vec::new();

    while let Some((failure, path, schema_path)) = stack.pop() {
        for child in &failure.context {
            stack.push((
                child,
                join(&path, &child.path),
                join(&schema_path, &child.schema_path),
            ));
        }

        flat.push(FlatFailure {
            keyword: failure.keyword.clone(),
            path,
            schema_path,
            message: failure.message.clone(),
        });
    }

    flat
}

fn join(parent: &[PathSegment], relative: &[PathSegment]) -> Vec<PathSegment> {
    let mut absolute = Vec::with_capacity(parent.len() + relative.len());
    absolute.extend_from_slice(parent);
    absolute.extend_from_slice(relative);
    absolute
}
