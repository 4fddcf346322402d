//! End-to-end clustering behavior over small table sets.

use slate_fingerprint::describe_columns;
use slate_match::{CancelToken, MatchOptions, TokenScorer, cluster_tables};
use slate_model::{CellValue, FileId, Row, Table, TableId};

fn table(id: &str, file: &str, headers: &[&str], rows: &[&[&str]]) -> Table {
    let headers: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
    let parsed: Vec<Row> = rows
        .iter()
        .map(|cells| {
            headers
                .iter()
                .zip(cells.iter())
                .map(|(h, raw)| (h.clone(), CellValue::from_text(raw)))
                .collect()
        })
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

#[test]
fn identical_schemas_cluster_at_full_confidence() {
    // Casing differences disappear under normalization.
    let tables = vec![
        table(
            "t1",
            "f1",
            &["Region", "Q1", "Q2"],
            &[&["EMEA", "10", "20"]],
        ),
        table(
            "t2",
            "f2",
            &["region", "q1", "q2"],
            &[&["APAC", "11", "21"], &["AMER", "12", "22"]],
        ),
    ];
    let clusters = cluster_tables(
        &tables,
        &TokenScorer::new(),
        &MatchOptions::default(),
        &CancelToken::new(),
    )
    .unwrap();

    assert_eq!(clusters.len(), 1);
    let cluster = &clusters[0];
    assert_eq!(cluster.confidence_score, 100.0);
    assert_eq!(cluster.matching_files, 2);
    assert_eq!(cluster.total_rows, 3);
    // Representative is the table with the most rows, so canonical names use
    // t2's lowercase headers.
    assert_eq!(cluster.representative_table.as_str(), "t2");
    assert_eq!(cluster.canonical_columns, vec!["region", "q1", "q2"]);
}

#[test]
fn near_duplicate_schemas_cluster_fuzzily() {
    // Wording noise keeps confidence in [90, 100).
    let tables = vec![
        table(
            "t1",
            "f1",
            &["Total Revenue", "Cost"],
            &[&["100", "40"], &["200", "90"]],
        ),
        table("t2", "f2", &["Revenue (EUR)", "Cost"], &[&["150", "60"]]),
    ];
    let clusters = cluster_tables(
        &tables,
        &TokenScorer::new(),
        &MatchOptions::default(),
        &CancelToken::new(),
    )
    .unwrap();

    assert_eq!(clusters.len(), 1);
    let cluster = &clusters[0];
    assert!(cluster.confidence_score >= 90.0, "{}", cluster.confidence_score);
    assert!(cluster.confidence_score < 100.0);
    assert_eq!(cluster.canonical_columns, vec!["Total Revenue", "Cost"]);

    // t2's columns resolve to t1's canonical names.
    let mapping = &cluster.column_mappings[&TableId::new("t2").unwrap()];
    assert_eq!(mapping["Revenue (EUR)"], "Total Revenue");
    assert_eq!(mapping["Cost"], "Cost");
}

#[test]
fn unrelated_schemas_stay_apart() {
    let tables = vec![
        table("t1", "f1", &["Region", "Q1"], &[&["EMEA", "10"]]),
        table("t2", "f2", &["Owner", "Due Date"], &[&["kim", "2024-01-01"]]),
    ];
    let clusters = cluster_tables(
        &tables,
        &TokenScorer::new(),
        &MatchOptions::default(),
        &CancelToken::new(),
    )
    .unwrap();
    assert_eq!(clusters.len(), 2);
    assert!(clusters.iter().all(|c| c.member_table_ids.len() == 1));
}

#[test]
fn tie_on_rows_picks_lowest_table_id() {
    let tables = vec![
        table("t2", "f1", &["Region", "Q1"], &[&["EMEA", "10"]]),
        table("t1", "f2", &["region", "q1"], &[&["APAC", "11"]]),
    ];
    let clusters = cluster_tables(
        &tables,
        &TokenScorer::new(),
        &MatchOptions::default(),
        &CancelToken::new(),
    )
    .unwrap();
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].representative_table.as_str(), "t1");
}

#[test]
fn clustering_is_deterministic() {
    let build = || {
        vec![
            table("t1", "f1", &["Region", "Q1"], &[&["EMEA", "10"]]),
            table("t2", "f2", &["region", "q1"], &[&["APAC", "11"]]),
            table("t3", "f3", &["Owner", "Task"], &[&["kim", "ship"]]),
        ]
    };
    let run = |tables: &[Table]| {
        cluster_tables(
            tables,
            &TokenScorer::new(),
            &MatchOptions::default(),
            &CancelToken::new(),
        )
        .unwrap()
    };
    let first = run(&build());
    let second = run(&build());
    let a: Vec<String> = first
        .iter()
        .map(|c| c.representative_fingerprint.to_hex())
        .collect();
    let b: Vec<String> = second
        .iter()
        .map(|c| c.representative_fingerprint.to_hex())
        .collect();
    assert_eq!(a, b);
}

#[test]
fn cancelled_token_aborts() {
    let tables = vec![
        table("t1", "f1", &["Region", "Q1"], &[&["EMEA", "10"]]),
        table("t2", "f2", &["region", "q1"], &[&["APAC", "11"]]),
    ];
    let token = CancelToken::new();
    token.cancel();
    let result = cluster_tables(
        &tables,
        &TokenScorer::new(),
        &MatchOptions::default(),
        &token,
    );
    assert!(result.is_err());
}
