//! Optional cluster cache.
//!
//! An explicit capability passed into the services, never a hidden
//! singleton, so tests can substitute a no-op or deterministic store. Caching
//! is an optimization only: both services recompute on a miss, and concurrent
//! writers racing on the same key simply overwrite each other.

use std::collections::HashMap;
use std::sync::Mutex;

use sha2::Digest;
use slate_fingerprint::fingerprint_columns;
use slate_match::{MatchOptions, SchemaCluster, SimilarityScorer};
use slate_model::Table;

pub trait ClusterCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Vec<SchemaCluster>>;
    fn put(&self, key: &str, clusters: &[SchemaCluster]);
}

/// Cache that stores nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl ClusterCache for NoopCache {
    fn get(&self, _key: &str) -> Option<Vec<SchemaCluster>> {
        None
    }

    fn put(&self, _key: &str, _clusters: &[SchemaCluster]) {}
}

/// Process-local cache, last write wins.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Vec<SchemaCluster>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClusterCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Vec<SchemaCluster>> {
        // A poisoned lock degrades to a miss; the cache is never required
        // for correctness.
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn put(&self, key: &str, clusters: &[SchemaCluster]) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), clusters.to_vec());
        }
    }
}

/// Key a table snapshot by content, not just by file set.
///
/// Keyed on each table's id, schema fingerprint, and row count, plus the
/// scorer and thresholds the clusters are computed under, so changed tables
/// or different match settings miss the cache instead of serving clusters
/// derived from other inputs.
pub fn snapshot_key(
    tables: &[Table],
    options: &MatchOptions,
    scorer: &dyn SimilarityScorer,
) -> String {
    let mut lines: Vec<String> = tables
        .iter()
        .map(|t| {
            format!(
                "{}:{}:{}",
                t.id,
                fingerprint_columns(&t.columns),
                t.row_count()
            )
        })
        .collect();
    lines.sort();
    lines.push(format!(
        "match:{}:{}:{}",
        scorer.name(),
        options.pair_floor,
        options.cluster_threshold
    ));
    hex::encode(sha2::Sha256::digest(lines.join("\n").as_bytes()))
}
