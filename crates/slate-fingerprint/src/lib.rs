//! Schema fingerprinting.
//!
//! A fingerprint is a SHA-256 hash of a table's canonicalized column
//! signature: the sorted `(normalized_name, inferred_type)` pairs plus the
//! column count. Tables whose column sets are equal up to ordering, casing,
//! and punctuation hash to the same fingerprint; tables with different column
//! counts never do.

pub mod fingerprint;
pub mod inference;
pub mod normalize;

pub use fingerprint::{Fingerprint, FingerprintError, canonical_signature, fingerprint_columns};
pub use inference::{describe_columns, infer_column_type};
pub use normalize::normalize_header;
