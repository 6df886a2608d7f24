// Ingestion and cleaning of spreadsheet data
pub mod batch;
pub mod cleaning;
pub mod csv_parser;
pub mod ledger;
pub mod normalizer;

pub use normalizer::{normalize, ParseOutcome};
