//! The table source seam.

use std::collections::BTreeMap;

use slate_model::{FileId, Table};

/// Supplies the tables extracted from a set of source files.
///
/// File ids arrive already visibility-filtered by the caller; implementations
/// must never return tables outside the requested set. Failures surface as
/// [`crate::ServiceError::Upstream`] without internal retries.
pub trait TableStore: Send + Sync {
    fn tables_for_files(&self, file_ids: &[FileId]) -> anyhow::Result<Vec<Table>>;
}

/// Table store over a fixed in-memory snapshot.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: BTreeMap<FileId, Vec<Table>>,
}

impl InMemoryStore {
    pub fn new(tables: impl IntoIterator<Item = Table>) -> Self {
        let mut grouped: BTreeMap<FileId, Vec<Table>> = BTreeMap::new();
        for table in tables {
            grouped
                .entry(table.source_file_id.clone())
                .or_default()
                .push(table);
        }
        Self { tables: grouped }
    }
}

impl TableStore for InMemoryStore {
    fn tables_for_files(&self, file_ids: &[FileId]) -> anyhow::Result<Vec<Table>> {
        let mut out = Vec::new();
        for id in file_ids {
            if let Some(tables) = self.tables.get(id) {
                out.extend(tables.iter().cloned());
            }
        }
        Ok(out)
    }
}
