//! Fuzzy schema matching and clustering.
//!
//! Tables whose fingerprints are equal belong together with no further work.
//! Tables whose fingerprints differ are compared column-by-column with a
//! pluggable similarity scorer; greedy one-to-one pairing plus coverage
//! weighting yields an overall schema similarity, and union-find groups every
//! table set for one request into [`SchemaCluster`]s.

pub mod cancel;
pub mod cluster;
pub mod error;
pub mod pairing;
pub mod score;
mod union_find;

pub use cancel::CancelToken;
pub use cluster::{ClusterWarning, SchemaCluster, cluster_tables};
pub use error::MatchError;
pub use pairing::{ColumnPair, MatchOptions, SchemaMatch, compare_columns, match_schemas};
pub use score::{SimilarityScorer, TokenScorer};
