#![deny(unsafe_code)]

use chrono::NaiveDate;

/// One cell of an extracted table.
///
/// A closed variant rather than raw JSON so downstream type-conflict rules
/// can be checked mechanically. `Unparsed` preserves content the extractor
/// produced but that has no scalar reading (nested arrays/objects).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Null,
    Number(f64),
    Text(String),
    Boolean(bool),
    Date(NaiveDate),
    Unparsed(String),
}

/// Sentinel strings the extractor emits for missing cells.
const NULL_SENTINELS: [&str; 3] = ["n/a", "none", "null"];

impl CellValue {
    /// Parse a raw extractor JSON scalar into a typed cell.
    ///
    /// Strings are sniffed for numbers (tolerating thousands separators and
    /// currency/percent noise), ISO dates, and booleans before falling back
    /// to `Text`. Empty and sentinel strings become `Null`.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Boolean(*b),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(v) => Self::Number(v),
                None => Self::Unparsed(n.to_string()),
            },
            serde_json::Value::String(s) => Self::from_text(s),
            other => Self::Unparsed(other.to_string()),
        }
    }

    /// Parse a raw string cell, sniffing numeric, date, and boolean forms.
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || NULL_SENTINELS.contains(&trimmed.to_lowercase().as_str()) {
            return Self::Null;
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return Self::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Self::Boolean(false);
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Self::Date(date);
        }
        // Tolerate currency and percent decoration around numbers.
        let cleaned: String = trimmed
            .chars()
            .filter(|c| !matches!(c, ',' | '%' | '$' | '€'))
            .collect();
        let cleaned = cleaned.trim();
        if !cleaned.is_empty() {
            if let Ok(v) = cleaned.parse::<f64>() {
                return Self::Number(v);
            }
        }
        Self::Text(trimmed.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Textual form used when a column widens to `Text`.
    ///
    /// `Null` has no textual form and stays null in widened output.
    pub fn as_display_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Number(v) => Some(format_number(*v)),
            Self::Text(s) | Self::Unparsed(s) => Some(s.clone()),
            Self::Boolean(b) => Some(b.to_string()),
            Self::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Format a number without a trailing `.0` for integral values.
fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}
