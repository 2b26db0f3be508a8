//! Relevance scoring and ranking
//!
//! Field-level mismatches (a wrong `type`, a value outside an `enum`) are
//! evidence of which combinator branch the author meant. Their weight is
//! propagated to every schema node above them, so each failure inherits the
//! weight accumulated along its own schema path. Lower scores rank first.
//!
//! Copyright (c) 2025 Schemavalidator Team
//! Licensed under the MIT license

use super::flatten::FlatFailure;
use super::table::{format_path, SCHEMA_ROOT};
use crate::validation::PathSegment;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Tunable weights used by [`score`]
///
/// [`RelevanceWeights::none()`] scores every failure 0, so ranking keeps the
/// flatten order: the combinator failure comes first, then its branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceWeights {
    /// Matched against the last instance-path segment; propagates
    pub fields: BTreeMap<String, u32>,
    /// Matched against the last schema-path segment; propagates
    pub validators: BTreeMap<String, u32>,
    /// Matched against the last schema-path segment; own score only
    pub non_propagating: BTreeMap<String, u32>,
}

impl Default for RelevanceWeights {
    fn default() -> Self {
        Self {
            fields: BTreeMap::from([("type".to_string(), 3)]),
            validators: BTreeMap::from([("enum".to_string(), 2)]),
            non_propagating: BTreeMap::from([("anyOf".to_string(), 1), ("oneOf".to_string(), 1)]),
        }
    }
}

impl RelevanceWeights {
    /// Weights that score every failure 0, leaving flatten order intact
    pub fn none() -> Self {
        Self {
            fields: BTreeMap::new(),
            validators: BTreeMap::new(),
            non_propagating: BTreeMap::new(),
        }
    }

    /// Weight shared with every ancestor schema node
    pub fn propagating(&self, failure: &FlatFailure) -> u32 {
        let field = last_key(&failure.path)
            .and_then(|key| self.fields.get(key))
            .copied()
            .unwrap_or(0);
        let validator = last_key(&failure.schema_path)
            .and_then(|key| self.validators.get(key))
            .copied()
            .unwrap_or(0);
        field + validator
    }

    /// Weight applied to the failure alone
    pub fn own(&self, failure: &FlatFailure) -> u32 {
        last_key(&failure.schema_path)
            .and_then(|key| self.non_propagating.get(key))
            .copied()
            .unwrap_or(0)
    }
}

fn last_key(path: &[PathSegment]) -> Option<&str> {
    path.last().and_then(PathSegment::as_key)
}

/// Accumulated propagating weight per schema node, keyed by rendered path
#[derive(Debug, Default)]
pub struct RelevanceTable {
    entries: HashMap<String, u32>,
}

impl RelevanceTable {
    /// Credit `weight` to every non-empty prefix of `schema_path`
    pub fn propagate(&mut self, schema_path: &[PathSegment], weight: u32) {
        for len in 1..=schema_path.len() {
            *self
                .entries
                .entry(format_path(&schema_path[..len], SCHEMA_ROOT))
                .or_default() += weight;
        }
    }

    /// Sum of the weight credited to every non-empty prefix of `schema_path`
    pub fn inherited(&self, schema_path: &[PathSegment]) -> u32 {
        (1..=schema_path.len())
            .filter_map(|len| {
                self.entries
                    .get(&format_path(&schema_path[..len], SCHEMA_ROOT))
            })
            .sum()
    }
}

/// A flattened failure with its relevance score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredFailure {
    #[serde(flatten)]
    pub failure: FlatFailure,
    /// Lower is more relevant
    pub score: u32,
}

/// Score failures, keeping their order
pub fn score(failures: Vec<FlatFailure>, weights: &RelevanceWeights) -> Vec<ScoredFailure> {
    let mut table = RelevanceTable::default();
    for failure in &failures {
        table.propagate(&failure.schema_path, weights.propagating(failure));
    }

    failures
        .into_iter()
        .map(|failure| {
            let score = weights.own(&failure) + table.inherited(&failure.schema_path);
            ScoredFailure { failure, score }
        })
        .collect()
}

/// Score failures and sort them most relevant first.
///
/// The sort is stable, so ties keep flatten order.
pub fn rank(failures: Vec<FlatFailure>, weights: &RelevanceWeights) -> Vec<ScoredFailure> {
    let mut scored = score(failures, weights);
    scored.sort_by_key(|scored| scored.score);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn flat(path: Vec<PathSegment>, schema_path: Vec<PathSegment>, message: &str) -> FlatFailure {
        FlatFailure {
            keyword: schema_path
                .last()
                .and_then(PathSegment::as_key)
                .unwrap_or_default()
                .to_string(),
            path,
            schema_path,
            message: message.to_string(),
        }
    }

    fn any_of_scenario() -> Vec<FlatFailure> {
        vec![
            flat(vec![], vec!["anyOf".into()], "any"),
            flat(vec![], vec!["anyOf".into(), PathSegment::Index(1), "required".into()], "value"),
            flat(vec![], vec!["anyOf".into(), PathSegment::Index(0), "required".into()], "age"),
            flat(vec![], vec!["anyOf".into(), PathSegment::Index(0), "required".into()], "name"),
        ]
    }

    fn messages(scored: &[ScoredFailure]) -> Vec<&str> {
        scored.iter().map(|s| s.failure.message.as_str()).collect()
    }

    #[test]
    fn test_default_weights() {
        let weights = RelevanceWeights::default();
        assert_eq!(weights.fields.get("type"), Some(&3));
        assert_eq!(weights.validators.get("enum"), Some(&2));
        assert_eq!(weights.non_propagating.get("anyOf"), Some(&1));
        assert_eq!(weights.non_propagating.get("oneOf"), Some(&1));
    }

    #[test]
    fn test_combinator_ranks_after_required_failures() {
        let ranked = rank(any_of_scenario(), &RelevanceWeights::default());

        assert_eq!(messages(&ranked), vec!["value", "age", "name", "any"]);
        let scores: Vec<u32> = ranked.iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![0, 0, 0, 1]);
    }

    #[test]
    fn test_without_weights_flatten_order_is_kept() {
        let ranked = rank(any_of_scenario(), &RelevanceWeights::none());

        assert_eq!(messages(&ranked), vec!["any", "value", "age", "name"]);
        assert!(ranked.iter().all(|s| s.score == 0));
    }

    #[test]
    fn test_weight_propagates_to_shared_ancestors() {
        let failures = vec![
            flat(vec![], vec!["anyOf".into()], "any"),
            flat(
                vec!["type".into()],
                vec![
                    "anyOf".into(),
                    PathSegment::Index(0),
                    "properties".into(),
                    "type".into(),
                    "enum".into(),
                ],
                "field",
            ),
            flat(vec![], vec!["anyOf".into(), PathSegment::Index(1), "required".into()], "other"),
        ];
        let weights = RelevanceWeights::default();
        assert_eq!(weights.propagating(&failures[1]), 5);

        let scored = score(failures, &weights);
        let scores: Vec<u32> = scored.iter().map(|s| s.score).collect();
        // any: own 1 + anyOf node 5; field: 5 prefixes of 5; other: anyOf node 5
        assert_eq!(scores, vec![6, 25, 5]);

        let ranked = rank(scored.into_iter().map(|s| s.failure).collect(), &weights);
        assert_eq!(messages(&ranked), vec!["other", "any", "field"]);
    }

    #[test]
    fn test_index_segments_never_match_fields() {
        let failure = flat(vec![PathSegment::Index(0)], vec!["items".into(), "type".into()], "x");
        let weights = RelevanceWeights::default();
        assert_eq!(weights.propagating(&failure), 0);
        assert_eq!(weights.own(&failure), 0);
    }

    #[test]
    fn test_weights_deserialize_with_defaults() {
        let weights: RelevanceWeights =
            serde_json::from_str(r#"{"validators": {"pattern": 4}}"#).unwrap();
        assert_eq!(weights.validators.get("pattern"), Some(&4));
        assert_eq!(weights.validators.get("enum"), None);
        assert_eq!(weights.fields.get("type"), Some(&3));
    }

    proptest! {
        #[test]
        fn prop_rank_is_sorted_and_stable(keys in proptest::collection::vec(0usize..4, 0..24)) {
            let names = ["anyOf", "oneOf", "enum", "required"];
            let failures: Vec<FlatFailure> = keys
                .iter()
                .enumerate()
                .map(|(i, k)| flat(vec![], vec![names[*k].into()], &i.to_string()))
                .collect();

            let ranked = rank(failures.clone(), &RelevanceWeights::default());
            prop_assert_eq!(ranked.len(), failures.len());
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].score <= pair[1].score);
                if pair[0].score == pair[1].score {
                    let a: usize = pair[0].failure.message.parse().unwrap();
                    let b: usize = pair[1].failure.message.parse().unwrap();
                    prop_assert!(a < b);
                }
            }
        }
    }
}
