use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use slate_cli::store::JsonExtractStore;
use slate_match::{CancelToken, MatchOptions};
use slate_model::FileId;
use slate_service::{
    AggregateRequest, AggregateResponse, AggregateService, PreviewRequest, PreviewResponse,
    PreviewService,
};

use crate::cli::{AggregateArgs, PreviewArgs};

pub fn run_preview(args: &PreviewArgs) -> Result<PreviewResponse> {
    let span = info_span!("preview", extract_dir = %args.extract_dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let store = JsonExtractStore::open(&args.extract_dir)?;
    let file_ids = resolve_file_ids(&store, &args.files)?;

    let mut service = PreviewService::new(store);
    if let Some(threshold) = args.threshold {
        service = service.with_options(MatchOptions {
            cluster_threshold: threshold,
            ..MatchOptions::default()
        });
    }

    let request = PreviewRequest { file_ids };
    let response = service.preview(&request, &CancelToken::new())?;
    info!(
        files = request.file_ids.len(),
        schemas = response.schemas.len(),
        duration_ms = start.elapsed().as_millis(),
        "preview complete"
    );
    Ok(response)
}

pub fn run_aggregate(args: &AggregateArgs) -> Result<AggregateResponse> {
    let span = info_span!("aggregate", fingerprint = %args.fingerprint);
    let _guard = span.enter();
    let start = Instant::now();

    let store = JsonExtractStore::open(&args.extract_dir)?;
    let file_ids = resolve_file_ids(&store, &args.files)?;

    let mut service = AggregateService::new(store);
    if let Some(threshold) = args.threshold {
        service = service.with_options(MatchOptions {
            cluster_threshold: threshold,
            ..MatchOptions::default()
        });
    }

    let request = AggregateRequest {
        file_ids,
        schema_fingerprint: args.fingerprint.clone(),
    };
    let response = service.aggregate(&request, &CancelToken::new())?;
    info!(
        files = request.file_ids.len(),
        rows = response.row_count,
        warnings = response.warnings.len(),
        duration_ms = start.elapsed().as_millis(),
        "aggregation complete"
    );

    if let Some(path) = &args.output {
        write_csv(path, &response)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), rows = response.row_count, "csv written");
    }

    Ok(response)
}

/// Use the requested file ids, or every file in the extract directory.
fn resolve_file_ids(store: &JsonExtractStore, requested: &[String]) -> Result<Vec<FileId>> {
    if requested.is_empty() {
        return Ok(store.file_ids());
    }
    requested
        .iter()
        .map(|raw| FileId::new(raw.as_str()).with_context(|| format!("invalid file id {raw:?}")))
        .collect()
}

/// Export merged rows as CSV with provenance flattened into trailing columns.
fn write_csv(path: &std::path::Path, response: &AggregateResponse) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header: Vec<&str> = response.columns.iter().map(|c| c.name.as_str()).collect();
    header.extend(["_source_file", "_source_locator", "_region"]);
    writer.write_record(&header)?;

    for row in &response.rows {
        let mut record: Vec<String> = response
            .columns
            .iter()
            .map(|column| {
                row.values
                    .get(&column.name)
                    .and_then(slate_model::CellValue::as_display_text)
                    .unwrap_or_default()
            })
            .collect();
        record.push(row.provenance.source_file.to_string());
        record.push(row.provenance.source_locator.to_string());
        record.push(row.provenance.region.clone().unwrap_or_default());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
