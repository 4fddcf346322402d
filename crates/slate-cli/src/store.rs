//! Table store over a directory of extractor JSON dumps.
//!
//! Each `.json` file in the extract directory is one source file's extraction
//! result: a file id, optional region metadata, and the tables pulled out of
//! it. The whole directory is loaded up front; preview and aggregate both run
//! over the same in-memory snapshot.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::debug;

use slate_fingerprint::describe_columns;
use slate_model::{CellValue, FileId, Row, Table, TableId};
use slate_service::TableStore;

/// On-disk shape of one extract dump.
#[derive(Debug, Deserialize)]
struct ExtractDocument {
    file_id: String,
    #[serde(default)]
    region: Option<String>,
    tables: Vec<ExtractTable>,
}

#[derive(Debug, Deserialize)]
struct ExtractTable {
    table_id: String,
    /// Slide or sheet index within the source document.
    #[serde(default)]
    locator: u32,
    headers: Vec<String>,
    #[serde(default)]
    rows: Vec<BTreeMap<String, serde_json::Value>>,
}

/// [`TableStore`] backed by a directory of extract dumps.
#[derive(Debug)]
pub struct JsonExtractStore {
    tables: BTreeMap<FileId, Vec<Table>>,
}

impl JsonExtractStore {
    /// Load every `.json` document under `dir`.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be read or any dump is malformed.
    pub fn open(dir: &Path) -> anyhow::Result<Self> {
        let mut tables: BTreeMap<FileId, Vec<Table>> = BTreeMap::new();

        for path in list_json_files(dir)? {
            let document = read_document(&path)?;
            let file_id = FileId::new(document.file_id.as_str())
                .with_context(|| format!("invalid file id in {}", path.display()))?;
            debug!(
                file_id = %file_id,
                tables = document.tables.len(),
                "loaded extract dump"
            );
            let parsed = parse_tables(&file_id, document)
                .with_context(|| format!("invalid table in {}", path.display()))?;
            tables.entry(file_id).or_default().extend(parsed);
        }

        Ok(Self { tables })
    }

    /// Every file id present in the extract directory, sorted.
    pub fn file_ids(&self) -> Vec<FileId> {
        self.tables.keys().cloned().collect()
    }
}

impl TableStore for JsonExtractStore {
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

/// Lists all JSON files in a directory, sorted by filename.
fn list_json_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read extract directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to read extract directory {}", dir.display()))?
            .path();
        if !path.is_file() {
            continue;
        }
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn read_document(path: &Path) -> anyhow::Result<ExtractDocument> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read extract dump {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse extract dump {}", path.display()))
}

fn parse_tables(file_id: &FileId, document: ExtractDocument) -> anyhow::Result<Vec<Table>> {
    let mut out = Vec::with_capacity(document.tables.len());

    for extract in document.tables {
        let id = TableId::new(extract.table_id.as_str())?;

        let rows: Vec<Row> = extract
            .rows
            .iter()
            .map(|raw| {
                raw.iter()
                    .map(|(name, value)| (name.clone(), CellValue::from_json(value)))
                    .collect()
            })
            .collect();

        let columns = describe_columns(&extract.headers, &rows);
        let mut table = Table::new(
            id,
            file_id.clone(),
            extract.locator,
            document.region.clone(),
            columns,
        )?;
        for row in rows {
            table.push_row(row);
        }
        out.push(table);
    }

    Ok(out)
}
