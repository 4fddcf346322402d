//! The aggregation engine: column union, type widening, row merge.

use std::collections::{BTreeMap, BTreeSet};

use slate_match::{CancelToken, ClusterWarning, SchemaCluster};
use slate_model::{CellValue, ColumnType, Provenance, Table, TableId};
use tracing::debug;

use crate::error::AggregateError;
use crate::types::{AggregatedColumn, AggregatedData, AggregatedRow};

const SAMPLE_LIMIT: usize = 5;

/// Merge the rows of a cluster's member tables into one dataset.
///
/// Members are processed in the cluster's `(source_file_id, table_id)` order
/// and rows keep their original order within each table, so repeated calls on
/// unchanged input produce identical output. Input tables are never mutated;
/// missing cells become explicit nulls, never fabricated values.
pub fn aggregate_cluster(
    cluster: &SchemaCluster,
    tables: &[Table],
    cancel: &CancelToken,
) -> Result<AggregatedData, AggregateError> {
    let by_id: BTreeMap<&TableId, &Table> = tables.iter().map(|t| (&t.id, t)).collect();
    let mut members = Vec::with_capacity(cluster.member_table_ids.len());
    for id in &cluster.member_table_ids {
        match by_id.get(id) {
            Some(table) => members.push(*table),
            None => return Err(AggregateError::MissingMember(id.clone())),
        }
    }

    // Column union: canonical columns first, then extra member columns that
    // have no mapping, in first-seen member order. Effective mappings send
    // each member column to its output name.
    let mut output_columns: Vec<String> = cluster.canonical_columns.clone();
    let mut effective: BTreeMap<&TableId, BTreeMap<&str, String>> = BTreeMap::new();
    for member in &members {
        let mapping = cluster.column_mappings.get(&member.id);
        let mut per_member: BTreeMap<&str, String> = BTreeMap::new();
        let mut claimed: BTreeSet<String> = BTreeSet::new();
        for column in &member.columns {
            if per_member.contains_key(column.raw_name.as_str()) {
                continue;
            }
            let mut output = mapping
                .and_then(|m| m.get(&column.raw_name))
                .unwrap_or(&column.raw_name)
                .clone();
            // An unmatched column whose raw name equals an output name
            // another column of this member already claimed would shadow
            // that column's values; give it a distinct output name instead.
            if claimed.contains(&output) {
                let base = output.clone();
                let mut n = 2;
                output = format!("{base} ({n})");
                while claimed.contains(&output) {
                    n += 1;
                    output = format!("{base} ({n})");
                }
                debug!(
                    table = %member.id,
                    column = %column.raw_name,
                    renamed = %output,
                    "output column name collision"
                );
            }
            if !output_columns.contains(&output) {
                output_columns.push(output.clone());
            }
            claimed.insert(output.clone());
            per_member.insert(column.raw_name.as_str(), output);
        }
        effective.insert(&member.id, per_member);
    }

    // Resolve each output column's type; mixed non-unknown types widen to
    // text across the entire merged output.
    let mut warnings = cluster.warnings.clone();
    let mut column_types: BTreeMap<&str, ColumnType> = BTreeMap::new();
    let mut widened: Vec<&str> = Vec::new();
    for name in &output_columns {
        let mut found: Vec<ColumnType> = Vec::new();
        for member in &members {
            for column in &member.columns {
                let maps_here = effective
                    .get(&member.id)
                    .and_then(|m| m.get(column.raw_name.as_str()))
                    .is_some_and(|out| *out == name.as_str());
                if maps_here
                    && column.inferred_type != ColumnType::Unknown
                    && !found.contains(&column.inferred_type)
                {
                    found.push(column.inferred_type);
                }
            }
        }
        let resolved = match found.len() {
            0 => ColumnType::Unknown,
            1 => found[0],
            _ => {
                found.sort();
                debug!(column = %name, ?found, "type conflict widened to text");
                warnings.push(ClusterWarning::TypeWidened {
                    column: name.clone(),
                    found: found.clone(),
                });
                widened.push(name.as_str());
                ColumnType::Text
            }
        };
        column_types.insert(name.as_str(), resolved);
    }

    // Row merge, members in ascending (source_file_id, table_id) order.
    let mut rows: Vec<AggregatedRow> = Vec::new();
    let mut source_files = Vec::new();
    for member in &members {
        if cancel.is_cancelled() {
            return Err(AggregateError::Cancelled);
        }
        if !source_files.contains(&member.source_file_id) {
            source_files.push(member.source_file_id.clone());
        }

        // Reverse map: output column -> member raw column. Output names are
        // unique within a member, so no column can shadow another.
        let mut reverse: BTreeMap<&str, &str> = BTreeMap::new();
        if let Some(per_member) = effective.get(&member.id) {
            for column in &member.columns {
                if let Some(out) = per_member.get(column.raw_name.as_str()) {
                    reverse.entry(out.as_str()).or_insert(column.raw_name.as_str());
                }
            }
        }

        for row in &member.rows {
            let mut values = BTreeMap::new();
            for name in &output_columns {
                let mut value = reverse
                    .get(name.as_str())
                    .and_then(|raw| row.get(*raw))
                    .cloned()
                    .unwrap_or(CellValue::Null);
                if widened.contains(&name.as_str()) {
                    value = value
                        .as_display_text()
                        .map_or(CellValue::Null, CellValue::Text);
                }
                values.insert(name.clone(), value);
            }
            rows.push(AggregatedRow {
                values,
                provenance: Provenance {
                    source_file: member.source_file_id.clone(),
                    source_locator: member.source_locator,
                    region: member.region.clone(),
                },
            });
        }
    }

    // Column metadata with sample values in row order.
    let columns = output_columns
        .iter()
        .map(|name| {
            let mut sample_values = Vec::new();
            for row in &rows {
                if sample_values.len() >= SAMPLE_LIMIT {
                    break;
                }
                if let Some(value) = row.values.get(name) {
                    if !value.is_null() && !sample_values.contains(value) {
                        sample_values.push(value.clone());
                    }
                }
            }
            AggregatedColumn {
                name: name.clone(),
                inferred_type: column_types
                    .get(name.as_str())
                    .copied()
                    .unwrap_or(ColumnType::Unknown),
                sample_values,
            }
        })
        .collect();

    Ok(AggregatedData {
        columns,
        rows,
        source_files,
        warnings,
    })
}
