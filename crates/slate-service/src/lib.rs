//! Request-scoped services over the fingerprint/match/aggregate pipeline.
//!
//! Both services are stateless functions over a read-only snapshot of the
//! caller-visible tables: Extract (external) → Fingerprint → Cluster →
//! {Preview | Aggregate}, recomputed per call. The caller's visibility filter
//! is the supplied file-id list; nothing here widens it.

pub mod aggregate;
pub mod cache;
pub mod error;
mod pipeline;
pub mod preview;
pub mod store;

pub use aggregate::{AggregateRequest, AggregateResponse, AggregateService};
pub use cache::{ClusterCache, MemoryCache, NoopCache};
pub use error::ServiceError;
pub use preview::{PreviewRequest, PreviewResponse, PreviewService, SchemaSummary};
pub use store::{InMemoryStore, TableStore};
