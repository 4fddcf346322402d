#![deny(unsafe_code)]

use std::collections::BTreeMap;

use slate_model::{CellValue, ColumnDescriptor, ColumnType, Row};

use crate::normalize::normalize_header;

/// Infer a column's type as the most frequent type among its non-null values.
///
/// All-null (or empty) columns are `Unknown`. Frequency ties resolve toward
/// `Text`, the safe widening target.
pub fn infer_column_type<'a>(values: impl IntoIterator<Item = &'a CellValue>) -> ColumnType {
    let mut counts: BTreeMap<ColumnType, usize> = BTreeMap::new();
    for value in values {
        if let Some(t) = ColumnType::of_cell(value) {
            *counts.entry(t).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .max_by_key(|&(t, count)| (count, tie_rank(t)))
        .map_or(ColumnType::Unknown, |(t, _)| t)
}

/// Tie-break preference: Text > Number > Date > Boolean.
fn tie_rank(t: ColumnType) -> u8 {
    match t {
        ColumnType::Text => 3,
        ColumnType::Number => 2,
        ColumnType::Date => 1,
        ColumnType::Boolean | ColumnType::Unknown => 0,
    }
}

/// Build descriptors for a table's headers from its row values.
pub fn describe_columns(raw_names: &[String], rows: &[Row]) -> Vec<ColumnDescriptor> {
    raw_names
        .iter()
        .map(|raw| {
            let inferred_type =
                infer_column_type(rows.iter().filter_map(|row| row.get(raw.as_str())));
            ColumnDescriptor {
                raw_name: raw.clone(),
                normalized_name: normalize_header(raw),
                inferred_type,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn majority_wins() {
        let values = [
            CellValue::Number(1.0),
            CellValue::Number(2.0),
            CellValue::Text("x".to_string()),
        ];
        assert_eq!(infer_column_type(&values), ColumnType::Number);
    }

    #[test]
    fn nulls_do_not_vote() {
        let values = [CellValue::Null, CellValue::Null, CellValue::Boolean(true)];
        assert_eq!(infer_column_type(&values), ColumnType::Boolean);
    }

    #[test]
    fn all_null_is_unknown() {
        let values = [CellValue::Null, CellValue::Null];
        assert_eq!(infer_column_type(&values), ColumnType::Unknown);
        assert_eq!(infer_column_type([]), ColumnType::Unknown);
    }

    #[test]
    fn tie_falls_back_to_text() {
        let values = [CellValue::Number(1.0), CellValue::Text("x".to_string())];
        assert_eq!(infer_column_type(&values), ColumnType::Text);
    }

    #[test]
    fn describes_missing_column_as_unknown() {
        let rows = vec![Row::from([(
            "A".to_string(),
            CellValue::Number(1.0),
        )])];
        let descriptors = describe_columns(&["A".to_string(), "B".to_string()], &rows);
        assert_eq!(descriptors[0].inferred_type, ColumnType::Number);
        assert_eq!(descriptors[1].inferred_type, ColumnType::Unknown);
        assert_eq!(descriptors[1].normalized_name, "b");
    }
}
