#![deny(unsafe_code)]

use std::collections::BTreeMap;

use crate::{CellValue, ColumnDescriptor, FileId, ModelError, TableId};

/// One row of cells, keyed by raw column name.
pub type Row = BTreeMap<String, CellValue>;

/// An immutable extraction result.
///
/// Tables are created once by the extractor and never mutated by the
/// aggregation core; clusters and merged rows are derived from them on demand.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Table {
    pub id: TableId,
    pub source_file_id: FileId,
    /// Slide or sheet index within the source document.
    pub source_locator: u32,
    /// Region parsed from filename/metadata, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(
        id: TableId,
        source_file_id: FileId,
        source_locator: u32,
        region: Option<String>,
        columns: Vec<ColumnDescriptor>,
    ) -> Result<Self, ModelError> {
        if columns.is_empty() {
            return Err(ModelError::EmptyColumnSet {
                table: id.to_string(),
            });
        }
        Ok(Self {
            id,
            source_file_id,
            source_locator,
            region,
            columns,
            rows: Vec::new(),
        })
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell for a given raw column name, if the row carries it.
    pub fn cell<'a>(&self, row: &'a Row, raw_name: &str) -> Option<&'a CellValue> {
        row.get(raw_name)
    }
}
