//! Deterministic clustering of tables by schema equivalence.

use std::collections::BTreeMap;

use slate_fingerprint::{Fingerprint, fingerprint_columns};
use slate_model::{ColumnType, Table, TableId};
use tracing::debug;

use crate::cancel::CancelToken;
use crate::error::MatchError;
use crate::pairing::{MatchOptions, compare_columns, identity_match};
use crate::score::SimilarityScorer;
use crate::union_find::UnionFind;

/// Non-fatal finding attached to a cluster.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClusterWarning {
    /// A merged column mixed incompatible types and was widened to text.
    TypeWidened {
        column: String,
        found: Vec<ColumnType>,
    },
    /// A member joined through a fuzzy chain; its direct similarity to the
    /// representative is below the cluster threshold.
    ChainedMember { table: TableId, similarity: f64 },
}

/// A group of tables judged to share one logical schema.
///
/// Ephemeral: computed per request from the caller-visible table set, never
/// persisted as ground truth.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SchemaCluster {
    pub representative_fingerprint: Fingerprint,
    pub representative_table: TableId,
    /// Members ordered by `(source_file_id, table_id)`, the aggregation order.
    pub member_table_ids: Vec<TableId>,
    /// Resolved column names, taken from the representative table.
    pub canonical_columns: Vec<String>,
    /// Per member: raw source column name to canonical name.
    pub column_mappings: BTreeMap<TableId, BTreeMap<String, String>>,
    /// 0-100; exactly 100 iff every member shares the representative
    /// fingerprint.
    pub confidence_score: f64,
    /// Distinct source files contributing members.
    pub matching_files: usize,
    pub total_rows: usize,
    pub warnings: Vec<ClusterWarning>,
}

/// Cluster a request's table set.
///
/// Fingerprint-equal tables union without any fuzzy comparison; one
/// representative per distinct fingerprint is then compared pairwise (O(n²)
/// in distinct schemas) and fuzzy matches union as well. The cancel token is
/// checked at table boundaries.
pub fn cluster_tables(
    tables: &[Table],
    scorer: &dyn SimilarityScorer,
    opts: &MatchOptions,
    cancel: &CancelToken,
) -> Result<Vec<SchemaCluster>, MatchError> {
    let fingerprints: Vec<Fingerprint> = tables
        .iter()
        .map(|t| fingerprint_columns(&t.columns))
        .collect();

    let mut uf = UnionFind::new(tables.len());

    // Exact phase: identical fingerprints always share a cluster.
    let mut by_fingerprint: BTreeMap<Fingerprint, Vec<usize>> = BTreeMap::new();
    for (index, fp) in fingerprints.iter().enumerate() {
        by_fingerprint.entry(*fp).or_default().push(index);
    }
    for indices in by_fingerprint.values() {
        for window in indices.windows(2) {
            uf.union(window[0], window[1]);
        }
    }

    // Fuzzy phase: one delegate per distinct fingerprint.
    let delegates: Vec<usize> = by_fingerprint.values().map(|v| v[0]).collect();
    for (i, &a) in delegates.iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(MatchError::Cancelled);
        }
        for &b in &delegates[i + 1..] {
            let result = compare_columns(&tables[a].columns, &tables[b].columns, scorer, opts);
            if result.is_match(opts) {
                debug!(
                    left = %tables[a].id,
                    right = %tables[b].id,
                    similarity = result.similarity,
                    "fuzzy schema match"
                );
                uf.union(a, b);
            }
        }
    }

    // Resolve components into clusters.
    let mut components: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for index in 0..tables.len() {
        components.entry(uf.find(index)).or_default().push(index);
    }

    let mut clusters = Vec::with_capacity(components.len());
    for members in components.into_values() {
        if cancel.is_cancelled() {
            return Err(MatchError::Cancelled);
        }
        clusters.push(build_cluster(tables, &fingerprints, &members, scorer, opts));
    }

    clusters.sort_by(|a, b| {
        b.total_rows
            .cmp(&a.total_rows)
            .then_with(|| a.representative_fingerprint.cmp(&b.representative_fingerprint))
    });
    Ok(clusters)
}

fn build_cluster(
    tables: &[Table],
    fingerprints: &[Fingerprint],
    members: &[usize],
    scorer: &dyn SimilarityScorer,
    opts: &MatchOptions,
) -> SchemaCluster {
    // Canonical naming comes from the member with the most rows; ties go to
    // the lowest table id.
    let rep = *members
        .iter()
        .max_by(|&&a, &&b| {
            tables[a]
                .row_count()
                .cmp(&tables[b].row_count())
                .then_with(|| tables[b].id.cmp(&tables[a].id))
        })
        .unwrap_or(&members[0]);
    let rep_table = &tables[rep];
    let rep_fp = fingerprints[rep];

    let canonical_columns: Vec<String> = rep_table
        .columns
        .iter()
        .map(|c| c.raw_name.clone())
        .collect();

    let mut warnings = Vec::new();
    let mut column_mappings: BTreeMap<TableId, BTreeMap<String, String>> = BTreeMap::new();
    let mut fuzzy_similarities = Vec::new();

    for &index in members {
        let member = &tables[index];
        let matched = if fingerprints[index] == rep_fp {
            identity_match(&member.columns, &rep_table.columns)
        } else {
            let result = compare_columns(&member.columns, &rep_table.columns, scorer, opts);
            fuzzy_similarities.push(result.similarity);
            if result.similarity < opts.cluster_threshold {
                warnings.push(ClusterWarning::ChainedMember {
                    table: member.id.clone(),
                    similarity: result.similarity,
                });
            }
            result
        };

        let mapping: BTreeMap<String, String> = matched
            .pairs
            .iter()
            .map(|pair| {
                (
                    member.columns[pair.left].raw_name.clone(),
                    rep_table.columns[pair.right].raw_name.clone(),
                )
            })
            .collect();
        column_mappings.insert(member.id.clone(), mapping);
    }

    let confidence_score = if fuzzy_similarities.is_empty() {
        100.0
    } else {
        // A fuzzy member can score 1.0 (same names, different types); keep
        // 100 reserved for fingerprint-identical clusters.
        let mean: f64 = fuzzy_similarities.iter().sum::<f64>() / fuzzy_similarities.len() as f64;
        (mean * 100.0).clamp(0.0, 99.9)
    };

    let mut ordered: Vec<usize> = members.to_vec();
    ordered.sort_by(|&a, &b| {
        (&tables[a].source_file_id, &tables[a].id).cmp(&(&tables[b].source_file_id, &tables[b].id))
    });

    let mut files: Vec<&slate_model::FileId> =
        ordered.iter().map(|&i| &tables[i].source_file_id).collect();
    files.dedup();
    let matching_files = files.len();

    SchemaCluster {
        representative_fingerprint: rep_fp,
        representative_table: rep_table.id.clone(),
        member_table_ids: ordered.iter().map(|&i| tables[i].id.clone()).collect(),
        canonical_columns,
        column_mappings,
        confidence_score,
        matching_files,
        total_rows: ordered.iter().map(|&i| tables[i].row_count()).sum(),
        warnings,
    }
}

impl SchemaCluster {
    /// True when any member carries the given fingerprint.
    pub fn contains_fingerprint(&self, fingerprint: &Fingerprint, tables: &[Table]) -> bool {
        if self.representative_fingerprint == *fingerprint {
            return true;
        }
        tables
            .iter()
            .filter(|t| self.member_table_ids.contains(&t.id))
            .any(|t| fingerprint_columns(&t.columns) == *fingerprint)
    }
}
