use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use slate_match::ClusterWarning;
use slate_model::CellValue;
use slate_service::{AggregateResponse, PreviewResponse};

pub fn print_preview(response: &PreviewResponse) {
    if response.schemas.is_empty() {
        println!("No shared schemas found.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Fingerprint"),
        header_cell("Columns"),
        header_cell("Files"),
        header_cell("Rows"),
        header_cell("Confidence"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for schema in &response.schemas {
        table.add_row(vec![
            Cell::new(short_fingerprint(&schema.fingerprint.to_string()))
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(schema.columns.join(", ")),
            Cell::new(schema.matching_files),
            Cell::new(schema.total_rows),
            confidence_cell(schema.confidence_score),
        ]);
    }
    println!("{table}");
}

pub fn print_aggregate(response: &AggregateResponse, limit: usize) {
    println!("Schema: {}", response.schema_fingerprint);
    println!(
        "Sources: {}",
        response
            .source_files
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );
    let mut table = Table::new();
    let mut header: Vec<Cell> = response
        .columns
        .iter()
        .map(|column| header_cell(&column.name))
        .collect();
    header.push(header_cell("Source"));
    table.set_header(header);
    apply_table_style(&mut table);
    let shown = response.rows.iter().take(limit);
    for row in shown {
        let mut cells: Vec<Cell> = response
            .columns
            .iter()
            .map(|column| value_cell(row.values.get(&column.name)))
            .collect();
        cells.push(
            Cell::new(format!(
                "{}#{}",
                row.provenance.source_file, row.provenance.source_locator
            ))
            .fg(Color::DarkGrey),
        );
        table.add_row(cells);
    }
    println!("{table}");
    if response.row_count > limit {
        println!("({} of {} rows shown)", limit, response.row_count);
    } else {
        println!("({} rows)", response.row_count);
    }
    print_warnings(&response.warnings);
}

fn print_warnings(warnings: &[ClusterWarning]) {
    if warnings.is_empty() {
        return;
    }
    println!();
    println!("Warnings:");
    for warning in warnings {
        match warning {
            ClusterWarning::TypeWidened { column, found } => {
                let found: Vec<&str> = found.iter().map(|t| t.as_str()).collect();
                println!("- column {column:?} mixed types ({}) widened to text", found.join(", "));
            }
            ClusterWarning::ChainedMember { table, similarity } => {
                println!(
                    "- table {table} joined through a fuzzy chain (similarity {similarity:.2})"
                );
            }
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn value_cell(value: Option<&CellValue>) -> Cell {
    match value.and_then(CellValue::as_display_text) {
        Some(text) => Cell::new(text),
        None => Cell::new("-").fg(Color::DarkGrey),
    }
}

fn confidence_cell(score: f64) -> Cell {
    let cell = Cell::new(format!("{score:.1}"));
    if score >= 100.0 {
        cell.fg(Color::Green)
    } else if score >= 90.0 {
        cell.fg(Color::Yellow)
    } else {
        cell.fg(Color::Red)
    }
}

fn short_fingerprint(hex: &str) -> String {
    match hex.get(..12) {
        Some(prefix) => format!("{prefix}…"),
        None => hex.to_string(),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
