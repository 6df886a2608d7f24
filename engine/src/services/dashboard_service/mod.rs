// engine/src/services/dashboard_service/mod.rs
// Main module hub for the dashboard service: the DashboardService struct,
// its request/response types, and the handler submodules.

use crate::config::EngineSettings;
use crate::data::ledger::TransactionStore;
use crate::error::EngineError;
use shared::models::{DashboardSummary, Region};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

pub mod build_summary;
pub mod helpers;
pub mod load_csv_data;

#[derive(Debug, Clone)]
pub struct LoadRegionRequest {
    pub region: Region,
    pub file_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadRegionResponse {
    pub success: bool,
    pub message: String,
    pub rows_loaded: usize,
    pub diagnostics_count: usize,
}

// Cheap to clone; clones share the same store
#[derive(Clone)]
pub struct DashboardService {
    store: Arc<RwLock<TransactionStore>>,
    settings: Arc<EngineSettings>,
}

impl DashboardService {
    pub fn new(store: Arc<RwLock<TransactionStore>>, settings: Arc<EngineSettings>) -> Self {
        DashboardService { store, settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub async fn load_region(&self, request: LoadRegionRequest) -> Result<LoadRegionResponse, EngineError> {
        tracing::info!(
            region = %request.region,
            path = %request.file_path.display(),
            "Received LoadRegionRequest, dispatching to handler."
        );
        load_csv_data::handle_load_region(request, self.store.clone(), self.settings.clone()).await
    }

    pub async fn build_summary(&self) -> Result<DashboardSummary, EngineError> {
        tracing::info!("Received BuildSummaryRequest, dispatching to handler.");
        build_summary::handle_build_summary(self.store.clone(), self.settings.clone()).await
    }
}
