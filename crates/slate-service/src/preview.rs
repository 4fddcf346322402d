//! Cheap, read-only cluster discovery over a caller-supplied file set.

use slate_fingerprint::Fingerprint;
use slate_match::{CancelToken, MatchOptions, SimilarityScorer, TokenScorer};
use slate_model::FileId;
use tracing::info;

use crate::cache::{ClusterCache, NoopCache};
use crate::error::ServiceError;
use crate::pipeline::derive_clusters;
use crate::store::TableStore;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PreviewRequest {
    pub file_ids: Vec<FileId>,
}

/// Summary of one shared schema; no rows are materialized.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SchemaSummary {
    pub fingerprint: Fingerprint,
    pub column_count: usize,
    pub columns: Vec<String>,
    pub matching_files: usize,
    pub total_rows: usize,
    pub confidence_score: f64,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PreviewResponse {
    pub schemas: Vec<SchemaSummary>,
}

/// Discovers schemas shared by at least two of the caller's files.
pub struct PreviewService<S> {
    store: S,
    cache: Box<dyn ClusterCache>,
    scorer: Box<dyn SimilarityScorer>,
    options: MatchOptions,
}

impl<S: TableStore> PreviewService<S> {
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

    /// Detect shared schemas across the requested files.
    ///
    /// Two or more distinct file ids are required; repeated ids collapse to
    /// one so no file's tables are loaded twice. Files that share nothing
    /// yield an empty schema list, which is success.
    pub fn preview(
        &self,
        request: &PreviewRequest,
        cancel: &CancelToken,
    ) -> Result<PreviewResponse, ServiceError> {
        let mut file_ids = request.file_ids.clone();
        file_ids.sort();
        file_ids.dedup();
        if file_ids.len() < 2 {
            return Err(ServiceError::InvalidInput(
                "at least 2 files required".to_string(),
            ));
        }

        let (_, clusters) = derive_clusters(
            &self.store,
            self.cache.as_ref(),
            self.scorer.as_ref(),
            &self.options,
            &file_ids,
            cancel,
        )?;

        let schemas: Vec<SchemaSummary> = clusters
            .iter()
            .filter(|c| c.matching_files >= 2)
            .map(|c| SchemaSummary {
                fingerprint: c.representative_fingerprint,
                column_count: c.canonical_columns.len(),
                columns: c.canonical_columns.clone(),
                matching_files: c.matching_files,
                total_rows: c.total_rows,
                confidence_score: c.confidence_score,
            })
            .collect();

        info!(
            files = file_ids.len(),
            schemas = schemas.len(),
            "schema preview computed"
        );
        Ok(PreviewResponse { schemas })
    }
}
