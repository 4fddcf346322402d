#![deny(unsafe_code)]

use std::fmt;

use crate::CellValue;

/// Inferred scalar type of a column, the majority type across its values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    Text,
    Date,
    Boolean,
    Unknown,
}

impl ColumnType {
    /// The type a single cell contributes to inference.
    ///
    /// `Unparsed` content is textual junk and counts as `Text`; `Null` cells
    /// contribute nothing and return `None`.
    pub fn of_cell(value: &CellValue) -> Option<Self> {
        match value {
            CellValue::Null => None,
            CellValue::Number(_) => Some(Self::Number),
            CellValue::Text(_) | CellValue::Unparsed(_) => Some(Self::Text),
            CellValue::Boolean(_) => Some(Self::Boolean),
            CellValue::Date(_) => Some(Self::Date),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Text => "text",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column of an extracted table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ColumnDescriptor {
    /// Header text exactly as extracted.
    pub raw_name: String,
    /// Lowercased, trimmed, punctuation-stripped form used for identity.
    pub normalized_name: String,
    pub inferred_type: ColumnType,
}
