#![deny(unsafe_code)]

use crate::FileId;

/// Origin of one aggregated row.
///
/// Always present on merged output, even for rows whose source table
/// contributed no matched business columns.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Provenance {
    /// Source file the row came from.
    pub source_file: FileId,
    /// Slide or sheet index within the source document.
    pub source_locator: u32,
    /// Region parsed from filename/metadata, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}
