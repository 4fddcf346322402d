#![deny(unsafe_code)]

use std::collections::BTreeMap;

use slate_match::ClusterWarning;
use slate_model::{CellValue, ColumnType, FileId, Provenance};

/// One merged output row: canonical column values plus origin metadata.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AggregatedRow {
    pub values: BTreeMap<String, CellValue>,
    pub provenance: Provenance,
}

/// A column of the merged dataset.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AggregatedColumn {
    pub name: String,
    pub inferred_type: ColumnType,
    /// Up to five distinct non-null values, in row order.
    pub sample_values: Vec<CellValue>,
}

/// The merged dataset for one cluster.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AggregatedData {
    pub columns: Vec<AggregatedColumn>,
    pub rows: Vec<AggregatedRow>,
    /// Distinct contributing files, in merge order.
    pub source_files: Vec<FileId>,
    /// Cluster warnings plus any type-widening findings.
    pub warnings: Vec<ClusterWarning>,
}

impl AggregatedData {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
