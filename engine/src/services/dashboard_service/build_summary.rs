// Handler for building the consolidated summary from loaded regions
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::aggregation::{consolidate, summarize_region};
use crate::config::EngineSettings;
use crate::data::ledger::TransactionStore;
use crate::error::EngineError;
use shared::models::DashboardSummary;

pub async fn handle_build_summary(
    store: Arc<RwLock<TransactionStore>>,
    settings: Arc<EngineSettings>,
) -> Result<DashboardSummary, EngineError> {
    let (from_date, to_date) = match settings.period {
        Some(period) => (Some(period.from), Some(period.to)),
        None => (None, None),
    };

    let store = store.read().await;
    let regions = store.loaded_regions();
    if regions.is_empty() {
        return Err(EngineError::StoreError("No region has been loaded".to_string()));
    }

    let mut summaries = Vec::with_capacity(regions.len());
    for region in regions {
        let transactions = store.get_transactions(region, from_date, to_date).unwrap_or_default();
        tracing::debug!(%region, rows = transactions.len(), ?from_date, ?to_date, "Summarizing region");
        summaries.push(summarize_region(region, &transactions));
    }
    let diagnostics = store.diagnostics().to_vec();
    drop(store);

    let summary = consolidate(summaries, diagnostics);
    tracing::info!(
        total_processes = summary.total_processes,
        total_value = summary.total_value,
        total_volume = summary.total_volume,
        diagnostics = summary.diagnostics.len(),
        "Dashboard summary built"
    );
    Ok(summary)
}
