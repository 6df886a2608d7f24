// Handler for loading one region's spreadsheet
use std::sync::Arc;
use tokio::sync::RwLock;

use super::helpers::tag_diagnostics;
use super::{LoadRegionRequest, LoadRegionResponse};
use crate::config::EngineSettings;
use crate::data::batch::normalize_cells_parallel;
use crate::data::cleaning::clean_row;
use crate::data::csv_parser::TransactionCsvParser;
use crate::data::ledger::TransactionStore;
use crate::error::EngineError;

pub async fn handle_load_region(
    req_payload: LoadRegionRequest,
    store: Arc<RwLock<TransactionStore>>,
    settings: Arc<EngineSettings>,
) -> Result<LoadRegionResponse, EngineError> {
    let region = req_payload.region;

    let raw_rows = {
        let path = req_payload.file_path.clone();
        let settings = settings.clone();
        tokio::task::spawn_blocking(move || {
            TransactionCsvParser::load_raw_rows(&path, region, &settings.csv, &settings.columns)
        })
        .await??
    };

    let volume_cells: Vec<String> = raw_rows.iter().map(|row| row.volume.clone()).collect();
    let value_cells: Vec<String> = raw_rows.iter().map(|row| row.value.clone()).collect();
    let chunk_size = settings.batch.chunk_size;
    let (volumes, values) = tokio::try_join!(
        normalize_cells_parallel(volume_cells, chunk_size),
        normalize_cells_parallel(value_cells, chunk_size),
    )?;

    let mut diagnostics = tag_diagnostics(region, &raw_rows, &settings.columns.volume, volumes.diagnostics);
    diagnostics.extend(tag_diagnostics(region, &raw_rows, &settings.columns.value, values.diagnostics));
    diagnostics.sort_by_key(|d| d.line);
    for cell in &diagnostics {
        tracing::warn!(
            region = %cell.region,
            line = cell.line,
            column = %cell.column,
            diagnostic = %cell.diagnostic,
            "Suspect cell counted as zero"
        );
    }

    let transactions: Vec<_> = raw_rows
        .into_iter()
        .zip(volumes.values)
        .zip(values.values)
        .map(|((raw, volume), value)| clean_row(raw, volume, value, &settings.completed_statuses))
        .collect();

    let rows_loaded = transactions.len();
    let diagnostics_count = diagnostics.len();
    store.write().await.add_transactions(region, transactions, diagnostics)?;

    tracing::info!(%region, path = %req_payload.file_path.display(), rows_loaded, diagnostics_count, "Region sheet loaded");
    Ok(LoadRegionResponse {
        success: true,
        message: format!("Loaded {} rows for region {}", rows_loaded, region),
        rows_loaded,
        diagnostics_count,
    })
}
