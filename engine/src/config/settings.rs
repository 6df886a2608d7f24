// Engine settings, loaded from a JSON file or the embedded defaults
use crate::error::EngineError;
use chrono::NaiveDate;
use serde::Deserialize;
use shared::utils::NumberConvention;
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../../assets/config/default.json");

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub csv: CsvSettings,
    pub columns: ColumnMapping,
    /// Status labels that mark an operation as completed.
    pub completed_statuses: Vec<String>,
    pub period: Option<ReportingPeriod>,
    pub display: NumberConvention,
    pub volume_unit: String,
    pub batch: BatchSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CsvSettings {
    pub delimiter: char,
}

// Header names of the columns the engine reads
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ColumnMapping {
    pub navigation: String,
    pub status: String,
    pub date: Option<String>,
    pub volume: String,
    pub value: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct ReportingPeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BatchSettings {
    pub chunk_size: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            csv: CsvSettings::default(),
            columns: ColumnMapping::default(),
            completed_statuses: vec!["CONCLUÍDO".to_string(), "CONCLUIDO".to_string()],
            period: None,
            display: NumberConvention::brazilian(),
            volume_unit: "TON".to_string(),
            batch: BatchSettings::default(),
        }
    }
}

impl Default for CsvSettings {
    fn default() -> Self {
        CsvSettings { delimiter: ';' }
    }
}

impl Default for ColumnMapping {
    fn default() -> Self {
        ColumnMapping {
            navigation: "Navegação".to_string(),
            status: "Status".to_string(),
            date: Some("Data".to_string()),
            volume: "Volume".to_string(),
            value: "Valor".to_string(),
        }
    }
}

impl Default for BatchSettings {
    fn default() -> Self {
        BatchSettings { chunk_size: 512 }
    }
}

impl EngineSettings {
    /// Settings shipped with the binary (`assets/config/default.json`).
    pub fn load_default() -> Result<Self, EngineError> {
        Self::from_json(DEFAULT_CONFIG)
    }

    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&contents)
            .map_err(|e| EngineError::ConfigError(format!("Invalid settings file '{}': {}", path.display(), e)))?;
        tracing::info!(path = %path.display(), "Loaded engine settings");
        Ok(settings)
    }

    pub fn from_json(contents: &str) -> Result<Self, EngineError> {
        let settings: EngineSettings = serde_json::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.csv.delimiter.is_ascii() {
            return Err(EngineError::ConfigError(format!(
                "CSV delimiter must be a single ASCII character, got '{}'",
                self.csv.delimiter
            )));
        }
        let required = [
            ("navigation", &self.columns.navigation),
            ("status", &self.columns.status),
            ("volume", &self.columns.volume),
            ("value", &self.columns.value),
        ];
        if let Some((key, _)) = required.iter().find(|(_, name)| name.trim().is_empty()) {
            return Err(EngineError::ConfigError(format!("Column name for '{}' cannot be empty", key)));
        }
        if let Some(period) = self.period {
            if period.from > period.to {
                return Err(EngineError::ConfigError(format!(
                    "Reporting period starts after it ends ({} > {})",
                    period.from, period.to
                )));
            }
        }
        Ok(())
    }
}
