use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// Regions covered by the bunker spreadsheets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Amazonas,
    Para,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::Amazonas, Region::Para];

    /// Two-letter state code used in file names and CLI arguments.
    pub fn code(&self) -> &'static str {
        match self {
            Region::Amazonas => "AM",
            Region::Para => "PA",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Region::Amazonas => "Amazonas",
            Region::Para => "Pará",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AM" => Ok(Region::Amazonas),
            "PA" => Ok(Region::Para),
            other => Err(format!("Unknown region '{}'. Use 'AM' or 'PA'.", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NavigationType {
    LongoCurso,
    Cabotagem,
}

impl NavigationType {
    pub const ALL: [NavigationType; 2] = [NavigationType::LongoCurso, NavigationType::Cabotagem];

    pub fn label(&self) -> &'static str {
        match self {
            NavigationType::LongoCurso => "LONGO CURSO",
            NavigationType::Cabotagem => "CABOTAGEM",
        }
    }

    // Labels come straight from the spreadsheet, so spacing and case vary
    pub fn from_label(label: &str) -> Option<Self> {
        let folded = label.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
        Self::ALL.into_iter().find(|nav| nav.label() == folded)
    }
}

impl fmt::Display for NavigationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Advisory note attached to a normalized cell value.
///
/// A diagnostic never blocks output: the cell still resolves to a number
/// (always `0.0` for the variants below), the diagnostic only explains why
/// that number should not be trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Both separators repeat, or they interleave, so no decimal mark can be inferred.
    AmbiguousFormat { raw: String },
    /// The parsed value is larger than any plausible cell and was discarded.
    /// `parsed` is `None` when the digits overflow `f64`.
    MagnitudeOutOfBounds { raw: String, parsed: Option<f64> },
    /// The canonical form is not a number token.
    Unparseable { raw: String, canonical: String },
}

impl Diagnostic {
    /// The original cell text that produced this diagnostic.
    pub fn raw(&self) -> &str {
        match self {
            Diagnostic::AmbiguousFormat { raw }
            | Diagnostic::MagnitudeOutOfBounds { raw, .. }
            | Diagnostic::Unparseable { raw, .. } => raw,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::AmbiguousFormat { raw } => {
                write!(f, "ambiguous number format '{}'", raw)
            }
            Diagnostic::MagnitudeOutOfBounds { raw, parsed: Some(parsed) } => {
                write!(f, "value '{}' parsed as {} exceeds the sanity bound", raw, parsed)
            }
            Diagnostic::MagnitudeOutOfBounds { raw, parsed: None } => {
                write!(f, "value '{}' overflows and exceeds the sanity bound", raw)
            }
            Diagnostic::Unparseable { raw, canonical } => {
                write!(f, "unparseable number '{}' (tried '{}')", raw, canonical)
            }
        }
    }
}

// A diagnostic traced back to the spreadsheet cell it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellDiagnostic {
    pub region: Region,
    pub line: usize,
    pub column: String,
    pub diagnostic: Diagnostic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub region: Region,
    pub line: usize,
    pub navigation: Option<NavigationType>,
    pub navigation_label: String,
    pub completed: bool,
    pub date: Option<NaiveDate>,
    pub volume: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub operations: u32,
    pub volume: f64,
    pub value: f64,
}

impl CategoryTotals {
    pub fn record(&mut self, volume: f64, value: f64) {
        self.operations = self.operations.saturating_add(1);
        self.volume += volume;
        self.value += value;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSummary {
    pub region: Region,
    pub total_rows: u32,
    pub completed: BTreeMap<NavigationType, CategoryTotals>,
    /// Completed rows whose navigation label matched no known type.
    pub unclassified_completed: u32,
}

impl RegionSummary {
    pub fn totals(&self, navigation: NavigationType) -> CategoryTotals {
        self.completed.get(&navigation).copied().unwrap_or_default()
    }

    pub fn completed_value(&self) -> f64 {
        self.completed.values().map(|t| t.value).sum()
    }

    pub fn completed_volume(&self) -> f64 {
        self.completed.values().map(|t| t.volume).sum()
    }

    pub fn completed_operations(&self) -> u32 {
        self.completed.values().fold(0u32, |total, t| total.saturating_add(t.operations))
    }

    /// Percentage of classified completed operations that belong to `navigation`.
    pub fn operations_share(&self, navigation: NavigationType) -> f64 {
        let total = self.completed_operations();
        if total == 0 {
            return 0.0;
        }
        self.totals(navigation).operations as f64 * 100.0 / total as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub regions: Vec<RegionSummary>,
    pub total_value: f64,
    pub total_volume: f64,
    pub total_processes: u32,
    pub diagnostics: Vec<CellDiagnostic>,
}

impl DashboardSummary {
    pub fn region(&self, region: Region) -> Option<&RegionSummary> {
        self.regions.iter().find(|r| r.region == region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_with(longo: CategoryTotals, cabotagem: CategoryTotals) -> RegionSummary {
        let mut completed = BTreeMap::new();
        completed.insert(NavigationType::LongoCurso, longo);
        completed.insert(NavigationType::Cabotagem, cabotagem);
        RegionSummary { region: Region::Amazonas, total_rows: 100, completed, unclassified_completed: 0 }
    }

    #[test]
    fn test_region_from_code() {
        assert_eq!("am".parse::<Region>().unwrap(), Region::Amazonas);
        assert_eq!(" PA ".parse::<Region>().unwrap(), Region::Para);
        assert!("SP".parse::<Region>().unwrap_err().contains("Unknown region 'SP'"));
    }

    #[test]
    fn test_navigation_from_label() {
        assert_eq!(NavigationType::from_label("LONGO CURSO"), Some(NavigationType::LongoCurso));
        assert_eq!(NavigationType::from_label("  longo   curso "), Some(NavigationType::LongoCurso));
        assert_eq!(NavigationType::from_label("Cabotagem"), Some(NavigationType::Cabotagem));
        assert_eq!(NavigationType::from_label("APOIO PORTUARIO"), None);
    }

    #[test]
    fn test_operations_share() {
        let summary = summary_with(
            CategoryTotals { operations: 3, volume: 0.0, value: 0.0 },
            CategoryTotals { operations: 1, volume: 0.0, value: 0.0 },
        );
        assert_eq!(summary.operations_share(NavigationType::LongoCurso), 75.0);
        assert_eq!(summary.operations_share(NavigationType::Cabotagem), 25.0);
        assert_eq!(summary.completed_operations(), 4);
    }

    #[test]
    fn test_operations_share_without_operations() {
        let summary = summary_with(CategoryTotals::default(), CategoryTotals::default());
        assert_eq!(summary.operations_share(NavigationType::LongoCurso), 0.0);
    }

    #[test]
    fn test_diagnostic_serializes_with_kind_tag() {
        let diagnostic = Diagnostic::Unparseable { raw: "abc".to_string(), canonical: String::new() };
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["kind"], "unparseable");
        assert_eq!(json["raw"], "abc");
        assert_eq!(diagnostic.raw(), "abc");
    }

    #[test]
    fn test_overflowed_magnitude_reads_back_from_json() {
        let diagnostic = Diagnostic::MagnitudeOutOfBounds { raw: "9".repeat(400), parsed: None };
        let json = serde_json::to_string(&diagnostic).unwrap();
        assert!(json.contains(r#""parsed":null"#));
        assert_eq!(serde_json::from_str::<Diagnostic>(&json).unwrap(), diagnostic);
        assert!(diagnostic.to_string().contains("overflows"));

        let bounded = Diagnostic::MagnitudeOutOfBounds { raw: "99999999999999".to_string(), parsed: Some(99999999999999.0) };
        let json = serde_json::to_string(&bounded).unwrap();
        assert_eq!(serde_json::from_str::<Diagnostic>(&json).unwrap(), bounded);
    }
}
