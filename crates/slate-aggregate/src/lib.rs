//! Virtual aggregation of one schema cluster.
//!
//! A virtual UNION ALL: rows from every member table are merged under the
//! cluster's canonical column names at query time, with provenance on every
//! row and type conflicts widened to text. Nothing is materialized in
//! storage.

pub mod engine;
pub mod error;
pub mod types;

pub use engine::aggregate_cluster;
pub use error::AggregateError;
pub use types::{AggregatedColumn, AggregatedData, AggregatedRow};
