//! Greedy column pairing between two schemas.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use slate_fingerprint::fingerprint_columns;
use slate_model::ColumnDescriptor;

use crate::score::SimilarityScorer;

/// Thresholds for fuzzy schema matching.
#[derive(Debug, Clone, Copy)]
pub struct MatchOptions {
    /// Minimum per-pair similarity for a column pairing to count.
    pub pair_floor: f64,
    /// Minimum coverage-weighted overall similarity for two tables to share
    /// a cluster.
    pub cluster_threshold: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            pair_floor: 0.6,
            cluster_threshold: 0.9,
        }
    }
}

/// One matched column pair, as indices into the two column slices.
#[derive(Debug, Clone, Copy)]
pub struct ColumnPair {
    pub left: usize,
    pub right: usize,
    pub similarity: f64,
}

/// Result of comparing two column sets.
#[derive(Debug, Clone)]
pub struct SchemaMatch {
    pub pairs: Vec<ColumnPair>,
    /// Matched pairs over the larger column count.
    pub coverage: f64,
    /// Mean pair similarity weighted by coverage.
    pub similarity: f64,
}

impl SchemaMatch {
    pub fn is_match(&self, opts: &MatchOptions) -> bool {
        self.similarity >= opts.cluster_threshold
    }
}

/// Compare two column sets with greedy one-to-one pairing.
///
/// Every cross pair at or above the floor is a candidate; candidates are
/// taken in descending similarity order, each column used at most once.
pub fn compare_columns(
    left: &[ColumnDescriptor],
    right: &[ColumnDescriptor],
    scorer: &dyn SimilarityScorer,
    opts: &MatchOptions,
) -> SchemaMatch {
    let mut candidates: Vec<ColumnPair> = Vec::new();
    for (i, a) in left.iter().enumerate() {
        for (j, b) in right.iter().enumerate() {
            let similarity = scorer.score(&a.raw_name, &b.raw_name);
            if similarity >= opts.pair_floor {
                candidates.push(ColumnPair {
                    left: i,
                    right: j,
                    similarity,
                });
            }
        }
    }

    candidates.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
            .then_with(|| (a.left, a.right).cmp(&(b.left, b.right)))
    });

    let mut used_left: BTreeSet<usize> = BTreeSet::new();
    let mut used_right: BTreeSet<usize> = BTreeSet::new();
    let mut pairs = Vec::new();
    for candidate in candidates {
        if used_left.contains(&candidate.left) || used_right.contains(&candidate.right) {
            continue;
        }
        used_left.insert(candidate.left);
        used_right.insert(candidate.right);
        pairs.push(candidate);
    }

    let larger = left.len().max(right.len());
    let coverage = if larger == 0 {
        0.0
    } else {
        pairs.len() as f64 / larger as f64
    };
    let similarity = if pairs.is_empty() {
        0.0
    } else {
        let mean: f64 = pairs.iter().map(|p| p.similarity).sum::<f64>() / pairs.len() as f64;
        mean * coverage
    };

    SchemaMatch {
        pairs,
        coverage,
        similarity,
    }
}

/// Compare two schemas, short-circuiting on fingerprint equality.
///
/// Fingerprint-equal schemas match with similarity 1.0 and identity pairing
/// on normalized names; fuzzy comparison is skipped entirely.
pub fn match_schemas(
    left: &[ColumnDescriptor],
    right: &[ColumnDescriptor],
    scorer: &dyn SimilarityScorer,
    opts: &MatchOptions,
) -> SchemaMatch {
    if fingerprint_columns(left) == fingerprint_columns(right) {
        return identity_match(left, right);
    }
    compare_columns(left, right, scorer, opts)
}

/// Pair fingerprint-equal column sets by normalized name and type.
pub(crate) fn identity_match(
    left: &[ColumnDescriptor],
    right: &[ColumnDescriptor],
) -> SchemaMatch {
    let mut used_right: BTreeSet<usize> = BTreeSet::new();
    let mut pairs = Vec::new();
    for (i, a) in left.iter().enumerate() {
        let matched = right.iter().enumerate().find(|(j, b)| {
            !used_right.contains(j)
                && b.normalized_name == a.normalized_name
                && b.inferred_type == a.inferred_type
        });
        if let Some((j, _)) = matched {
            used_right.insert(j);
            pairs.push(ColumnPair {
                left: i,
                right: j,
                similarity: 1.0,
            });
        }
    }
    SchemaMatch {
        pairs,
        coverage: 1.0,
        similarity: 1.0,
    }
}
