// Engine configuration
pub mod settings;

pub use settings::{BatchSettings, ColumnMapping, CsvSettings, EngineSettings, ReportingPeriod};
