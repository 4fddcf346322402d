//! Aggregation engine behavior over clustered tables.

use slate_aggregate::aggregate_cluster;
use slate_fingerprint::describe_columns;
use slate_match::{CancelToken, ClusterWarning, MatchOptions, TokenScorer, cluster_tables};
use slate_model::{CellValue, ColumnType, FileId, Row, Table, TableId};

fn table_from_cells(id: &str, file: &str, headers: &[&str], rows: Vec<Vec<CellValue>>) -> Table {
    let headers: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
    let parsed: Vec<Row> = rows
        .into_iter()
        .map(|cells| headers.iter().cloned().zip(cells).collect())
        .collect();
    let columns = describe_columns(&headers, &parsed);
    let mut table = Table::new(
        TableId::new(id).unwrap(),
        FileId::new(file).unwrap(),
        0,
        None,
        columns,
    )
    .unwrap();
    for row in parsed {
        table.push_row(row);
    }
    table
}

fn table(id: &str, file: &str, headers: &[&str], rows: &[&[&str]]) -> Table {
    table_from_cells(
        id,
        file,
        headers,
        rows.iter()
            .map(|cells| cells.iter().map(|raw| CellValue::from_text(raw)).collect())
            .collect(),
    )
}

fn cluster_and_aggregate(
    tables: &[Table],
    opts: &MatchOptions,
) -> slate_aggregate::AggregatedData {
    let clusters = cluster_tables(tables, &TokenScorer::new(), opts, &CancelToken::new()).unwrap();
    assert_eq!(clusters.len(), 1, "expected a single cluster");
    aggregate_cluster(&clusters[0], tables, &CancelToken::new()).unwrap()
}

#[test]
fn single_member_cluster_reproduces_rows() {
    let tables = vec![table(
        "t1",
        "f1",
        &["Region", "Q1"],
        &[&["EMEA", "10"], &["APAC", "11"]],
    )];
    let data = cluster_and_aggregate(&tables, &MatchOptions::default());

    assert_eq!(data.row_count(), 2);
    assert_eq!(data.rows[0].values["Region"], CellValue::Text("EMEA".to_string()));
    assert_eq!(data.rows[0].values["Q1"], CellValue::Number(10.0));
    assert_eq!(data.rows[1].values["Region"], CellValue::Text("APAC".to_string()));
    assert!(data.warnings.is_empty());
}

#[test]
fn missing_columns_fill_with_null() {
    // The second table lacks Q4, so its rows carry explicit nulls.
    let tables = vec![
        table(
            "t1",
            "f1",
            &["Region", "Q1", "Q4"],
            &[&["EMEA", "10", "40"], &["AMER", "12", "44"]],
        ),
        table("t2", "f2", &["Region", "Q1"], &[&["APAC", "11"]]),
    ];
    let opts = MatchOptions {
        pair_floor: 0.6,
        cluster_threshold: 0.6,
    };
    let data = cluster_and_aggregate(&tables, &opts);

    assert!(data.columns.iter().any(|c| c.name == "Q4"));
    assert_eq!(data.row_count(), 3);
    for row in &data.rows {
        if row.provenance.source_file.as_str() == "f2" {
            assert_eq!(row.values["Q4"], CellValue::Null);
        } else {
            assert!(!row.values["Q4"].is_null());
        }
    }
}

#[test]
fn type_conflict_widens_to_text_everywhere() {
    // Amount is numeric in one table and text in the other.
    let tables = vec![
        table_from_cells(
            "t1",
            "f1",
            &["Amount", "Item"],
            vec![
                vec![CellValue::Number(100.0), CellValue::Text("widget".to_string())],
                vec![CellValue::Number(250.5), CellValue::Text("gadget".to_string())],
            ],
        ),
        table_from_cells(
            "t2",
            "f2",
            &["Amount", "Item"],
            vec![vec![
                CellValue::Text("N/A".to_string()),
                CellValue::Text("gizmo".to_string()),
            ]],
        ),
    ];
    let data = cluster_and_aggregate(&tables, &MatchOptions::default());

    let amount = data.columns.iter().find(|c| c.name == "Amount").unwrap();
    assert_eq!(amount.inferred_type, ColumnType::Text);
    assert!(data.warnings.iter().any(|w| matches!(
        w,
        ClusterWarning::TypeWidened { column, .. } if column == "Amount"
    )));

    // Numeric values are stringified, text passes through.
    let texts: Vec<&CellValue> = data.rows.iter().map(|r| &r.values["Amount"]).collect();
    assert_eq!(*texts[0], CellValue::Text("100".to_string()));
    assert_eq!(*texts[1], CellValue::Text("250.5".to_string()));
    assert_eq!(*texts[2], CellValue::Text("N/A".to_string()));
}

#[test]
fn colliding_member_column_keeps_its_values() {
    // One member maps a column onto "Total Revenue" while also carrying its
    // own raw "Total Revenue"; the extra column must surface under a
    // distinct name rather than being shadowed.
    let tables = vec![
        table("t1", "f1", &["Total Revenue"], &[&["100"], &["200"]]),
        table(
            "t2",
            "f2",
            &["Revenue Total", "Total Revenue"],
            &[&["300", "999"]],
        ),
    ];
    let opts = MatchOptions {
        pair_floor: 0.6,
        cluster_threshold: 0.5,
    };
    let data = cluster_and_aggregate(&tables, &opts);

    assert!(data.columns.iter().any(|c| c.name == "Total Revenue (2)"));
    let merged = data
        .rows
        .iter()
        .find(|r| r.provenance.source_file.as_str() == "f2")
        .unwrap();
    assert_eq!(merged.values["Total Revenue"], CellValue::Number(300.0));
    assert_eq!(merged.values["Total Revenue (2)"], CellValue::Number(999.0));
}

#[test]
fn rows_are_ordered_by_file_then_original_order() {
    let tables = vec![
        table("t2", "f2", &["Region", "Q1"], &[&["APAC", "11"]]),
        table(
            "t1",
            "f1",
            &["region", "q1"],
            &[&["EMEA", "10"], &["AMER", "12"]],
        ),
    ];
    let data = cluster_and_aggregate(&tables, &MatchOptions::default());

    let files: Vec<&str> = data
        .rows
        .iter()
        .map(|r| r.provenance.source_file.as_str())
        .collect();
    assert_eq!(files, vec!["f1", "f1", "f2"]);
}

#[test]
fn provenance_files_are_reported_source_files() {
    let tables = vec![
        table("t1", "f1", &["Region", "Q1"], &[&["EMEA", "10"]]),
        table("t2", "f2", &["region", "q1"], &[&["APAC", "11"]]),
    ];
    let data = cluster_and_aggregate(&tables, &MatchOptions::default());

    for row in &data.rows {
        assert!(data.source_files.contains(&row.provenance.source_file));
    }
    assert_eq!(data.source_files.len(), 2);
}

#[test]
fn widening_never_drops_values() {
    let tables = vec![
        table_from_cells(
            "t1",
            "f1",
            &["Score"],
            vec![vec![CellValue::Number(7.0)], vec![CellValue::Null]],
        ),
        table_from_cells(
            "t2",
            "f2",
            &["Score"],
            vec![vec![CellValue::Text("high".to_string())]],
        ),
    ];
    let data = cluster_and_aggregate(&tables, &MatchOptions::default());

    let values: Vec<&CellValue> = data.rows.iter().map(|r| &r.values["Score"]).collect();
    assert_eq!(*values[0], CellValue::Text("7".to_string()));
    assert_eq!(*values[1], CellValue::Null);
    assert_eq!(*values[2], CellValue::Text("high".to_string()));
}

#[test]
fn cancelled_token_aborts_row_merge() {
    let tables = vec![table("t1", "f1", &["Region", "Q1"], &[&["EMEA", "10"]])];
    let clusters = cluster_tables(
        &tables,
        &TokenScorer::new(),
        &MatchOptions::default(),
        &CancelToken::new(),
    )
    .unwrap();
    let token = CancelToken::new();
    token.cancel();
    assert!(aggregate_cluster(&clusters[0], &tables, &token).is_err());
}
