//! Shared load-and-cluster step behind both services.

use slate_match::{CancelToken, MatchOptions, SchemaCluster, SimilarityScorer, cluster_tables};
use slate_model::{FileId, Table};
use tracing::debug;

use crate::cache::{ClusterCache, snapshot_key};
use crate::error::ServiceError;
use crate::store::TableStore;

pub(crate) fn derive_clusters(
    store: &dyn TableStore,
    cache: &dyn ClusterCache,
    scorer: &dyn SimilarityScorer,
    options: &MatchOptions,
    file_ids: &[FileId],
    cancel: &CancelToken,
) -> Result<(Vec<Table>, Vec<SchemaCluster>), ServiceError> {
    let tables = store.tables_for_files(file_ids)?;

    let key = snapshot_key(&tables, options, scorer);
    if let Some(clusters) = cache.get(&key) {
        debug!(%key, "cluster cache hit");
        return Ok((tables, clusters));
    }

    let clusters = cluster_tables(&tables, scorer, options, cancel)?;
    cache.put(&key, &clusters);
    Ok((tables, clusters))
}
