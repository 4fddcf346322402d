//! Fingerprint identity properties.

use proptest::prelude::*;
use slate_fingerprint::{describe_columns, fingerprint_columns, normalize_header};
use slate_model::{CellValue, ColumnDescriptor, ColumnType, Row};

fn descriptors(headers: &[&str], types: &[ColumnType]) -> Vec<ColumnDescriptor> {
    headers
        .iter()
        .zip(types)
        .map(|(raw, t)| ColumnDescriptor {
            raw_name: (*raw).to_string(),
            normalized_name: normalize_header(raw),
            inferred_type: *t,
        })
        .collect()
}

#[test]
fn equal_column_sets_share_a_fingerprint() {
    // Same columns up to order and casing.
    let a = descriptors(
        &["Region", "Q1", "Q2"],
        &[ColumnType::Text, ColumnType::Number, ColumnType::Number],
    );
    let b = descriptors(
        &["q2", "region", "q1"],
        &[ColumnType::Number, ColumnType::Text, ColumnType::Number],
    );
    assert_eq!(fingerprint_columns(&a), fingerprint_columns(&b));
}

#[test]
fn different_column_counts_never_collide() {
    let a = descriptors(&["Region", "Q1"], &[ColumnType::Text, ColumnType::Number]);
    let b = descriptors(
        &["Region", "Q1", "Q2"],
        &[ColumnType::Text, ColumnType::Number, ColumnType::Number],
    );
    assert_ne!(fingerprint_columns(&a), fingerprint_columns(&b));
}

#[test]
fn wording_differences_change_the_fingerprint() {
    // Near-duplicate headers still hash differently; catching them is
    // the fuzzy matcher's job.
    let a = descriptors(
        &["Total Revenue", "Cost"],
        &[ColumnType::Number, ColumnType::Number],
    );
    let b = descriptors(
        &["Revenue (EUR)", "Cost"],
        &[ColumnType::Number, ColumnType::Number],
    );
    assert_ne!(fingerprint_columns(&a), fingerprint_columns(&b));
}

#[test]
fn described_columns_fingerprint_from_values() {
    let rows = vec![
        Row::from([
            ("Region".to_string(), CellValue::Text("EMEA".to_string())),
            ("Q1".to_string(), CellValue::Number(10.0)),
        ]),
        Row::from([
            ("Region".to_string(), CellValue::Text("APAC".to_string())),
            ("Q1".to_string(), CellValue::Number(12.0)),
        ]),
    ];
    let columns = describe_columns(&["Region".to_string(), "Q1".to_string()], &rows);
    assert_eq!(columns[0].inferred_type, ColumnType::Text);
    assert_eq!(columns[1].inferred_type, ColumnType::Number);
}

fn arb_column() -> impl Strategy<Value = ColumnDescriptor> {
    ("[A-Za-z][A-Za-z0-9 ]{0,12}", 0u8..5).prop_map(|(raw, t)| ColumnDescriptor {
        normalized_name: normalize_header(&raw),
        raw_name: raw,
        inferred_type: match t {
            0 => ColumnType::Number,
            1 => ColumnType::Text,
            2 => ColumnType::Date,
            3 => ColumnType::Boolean,
            _ => ColumnType::Unknown,
        },
    })
}

proptest! {
    #[test]
    fn permutation_does_not_change_fingerprint(
        columns in proptest::collection::vec(arb_column(), 1..8),
        seed in any::<u64>(),
    ) {
        let baseline = fingerprint_columns(&columns);
        let mut shuffled = columns;
        // Deterministic shuffle driven by the seed.
        let len = shuffled.len();
        for i in 0..len {
            let j = (seed as usize).wrapping_mul(i + 1) % len;
            shuffled.swap(i, j);
        }
        prop_assert_eq!(baseline, fingerprint_columns(&shuffled));
    }

    #[test]
    fn normalization_is_idempotent(raw in ".{0,24}") {
        let once = normalize_header(&raw);
        prop_assert_eq!(normalize_header(&once), once.clone());
    }
}
