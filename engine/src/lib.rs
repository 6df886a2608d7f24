// Engine library root: ingestion, numeric normalization, aggregation and reporting
pub mod aggregation;
pub mod cli;
pub mod commands;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod models;
pub mod report;
pub mod services;

pub use error::EngineError;
