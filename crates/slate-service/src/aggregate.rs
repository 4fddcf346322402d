//! Full merged-row materialization for one previously discovered cluster.

use slate_aggregate::{AggregatedColumn, AggregatedRow, aggregate_cluster};
use slate_fingerprint::Fingerprint;
use slate_match::{CancelToken, ClusterWarning, MatchOptions, SimilarityScorer, TokenScorer};
use slate_model::FileId;
use tracing::info;

use crate::cache::{ClusterCache, NoopCache};
use crate::error::ServiceError;
use crate::pipeline::derive_clusters;
use crate::store::TableStore;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AggregateRequest {
    /// The caller's visible file set; never widened here.
    pub file_ids: Vec<FileId>,
    /// 64-hex fingerprint surfaced by a previous preview.
    pub schema_fingerprint: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AggregateResponse {
    /// The requested fingerprint, echoed back.
    pub schema_fingerprint: Fingerprint,
    pub columns: Vec<AggregatedColumn>,
    pub row_count: usize,
    pub rows: Vec<AggregatedRow>,
    pub source_files: Vec<FileId>,
    /// Non-fatal findings: type widening, fuzzy-chain members.
    pub warnings: Vec<ClusterWarning>,
}

/// Materializes merged rows for the cluster carrying a given fingerprint.
pub struct AggregateService<S> {
    store: S,
    cache: Box<dyn ClusterCache>,
    scorer: Box<dyn SimilarityScorer>,
    options: MatchOptions,
}

impl<S: TableStore> AggregateService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            cache: Box::new(NoopCache),
            scorer: Box::new(TokenScorer::new()),
            options: MatchOptions::default(),
        }
    }

    #[must_use]
    pub fn with_cache(mut self, cache: Box<dyn ClusterCache>) -> Self {
        self.cache = cache;
        self
    }

    #[must_use]
    pub fn with_scorer(mut self, scorer: Box<dyn SimilarityScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Re-derive clusters over the visible set and merge the one matching
    /// the requested fingerprint.
    pub fn aggregate(
        &self,
        request: &AggregateRequest,
        cancel: &CancelToken,
    ) -> Result<AggregateResponse, ServiceError> {
        let fingerprint = Fingerprint::parse(&request.schema_fingerprint)
            .map_err(|e| ServiceError::InvalidInput(e.to_string()))?;

        // Repeated ids collapse to one so no file's rows merge twice.
        let mut file_ids = request.file_ids.clone();
        file_ids.sort();
        file_ids.dedup();

        let (tables, clusters) = derive_clusters(
            &self.store,
            self.cache.as_ref(),
            self.scorer.as_ref(),
            &self.options,
            &file_ids,
            cancel,
        )?;

        let cluster = clusters
            .iter()
            .find(|c| c.contains_fingerprint(&fingerprint, &tables))
            .ok_or_else(|| ServiceError::NotFound(request.schema_fingerprint.clone()))?;

        let data = aggregate_cluster(cluster, &tables, cancel)?;
        info!(
            fingerprint = %fingerprint,
            rows = data.row_count(),
            files = data.source_files.len(),
            "aggregation computed"
        );

        Ok(AggregateResponse {
            // Echo the fingerprint the caller asked for, which may belong to
            // a non-representative member of the merged cluster.
            schema_fingerprint: fingerprint,
            row_count: data.row_count(),
            columns: data.columns,
            rows: data.rows,
            source_files: data.source_files,
            warnings: data.warnings,
        })
    }
}
