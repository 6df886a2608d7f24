// Helper functions for dashboard_service handlers
use crate::data::batch::IndexedDiagnostic;
use crate::models::RawTransaction;
use shared::models::{CellDiagnostic, Region};

// Maps column-relative diagnostics back to spreadsheet lines
pub fn tag_diagnostics(
    region: Region,
    rows: &[RawTransaction],
    column: &str,
    diagnostics: Vec<IndexedDiagnostic>,
) -> Vec<CellDiagnostic> {
    diagnostics
        .into_iter()
        .map(|d| CellDiagnostic {
            region,
            line: rows.get(d.index).map_or(d.index + 2, |row| row.line),
            column: column.to_string(),
            diagnostic: d.diagnostic,
        })
        .collect()
}
