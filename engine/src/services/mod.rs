// Service layer: orchestrates ingestion and summarization
pub mod dashboard_service;

pub use dashboard_service::{DashboardService, LoadRegionRequest, LoadRegionResponse};
