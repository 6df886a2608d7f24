//! Plain-text and JSON rendering of a [`DashboardSummary`].

use shared::models::{DashboardSummary, NavigationType, RegionSummary};
use shared::utils::{format_currency, format_number, NumberConvention};
use std::fmt::Write;

use crate::error::EngineError;

pub fn render_json(summary: &DashboardSummary) -> Result<String, EngineError> {
    Ok(serde_json::to_string_pretty(summary)?)
}

pub fn render_text(summary: &DashboardSummary, convention: &NumberConvention, volume_unit: &str) -> String {
    let mut out = String::new();
    let codes: Vec<&str> = summary.regions.iter().map(|r| r.region.code()).collect();

    // Writing to a String cannot fail
    let _ = writeln!(out, "Consolidated overview ({})", codes.join(" + "));
    let _ = writeln!(out, "  Total value (completed operations):  {}", format_currency(summary.total_value, convention));
    let _ = writeln!(
        out,
        "  Total volume (completed operations): {} {}",
        format_number(summary.total_volume, 2, convention),
        volume_unit
    );
    let _ = writeln!(out, "  Total processes (all rows):          {}", format_number(summary.total_processes as f64, 0, convention));

    for region in &summary.regions {
        let _ = writeln!(out);
        render_region(&mut out, region, convention, volume_unit);
    }

    if !summary.diagnostics.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Suspect cells counted as zero: {}", summary.diagnostics.len());
        for cell in &summary.diagnostics {
            let _ = writeln!(out, "  {} line {} [{}]: {}", cell.region, cell.line, cell.column, cell.diagnostic);
        }
    }
    out
}

fn render_region(out: &mut String, region: &RegionSummary, convention: &NumberConvention, volume_unit: &str) {
    let _ = writeln!(out, "{} ({})", region.region.display_name(), region.region.code());
    let _ = writeln!(out, "  Processes (rows): {}", format_number(region.total_rows as f64, 0, convention));
    for navigation in NavigationType::ALL {
        let totals = region.totals(navigation);
        let _ = writeln!(
            out,
            "  {:<12} ops {:>5} ({}%)  volume {} {}  value {}",
            navigation.label(),
            totals.operations,
            format_number(region.operations_share(navigation), 1, convention),
            format_number(totals.volume, 2, convention),
            volume_unit,
            format_currency(totals.value, convention)
        );
    }
    if region.unclassified_completed > 0 {
        let _ = writeln!(out, "  Completed rows with unknown navigation type: {}", region.unclassified_completed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{CategoryTotals, CellDiagnostic, Diagnostic, Region};
    use std::collections::BTreeMap;

    fn sample_summary() -> DashboardSummary {
        let mut completed = BTreeMap::new();
        completed.insert(NavigationType::LongoCurso, CategoryTotals { operations: 3, volume: 1500.5, value: 73250396.52 });
        completed.insert(NavigationType::Cabotagem, CategoryTotals { operations: 1, volume: 200.0, value: 0.0 });
        let am = RegionSummary { region: Region::Amazonas, total_rows: 1000, completed, unclassified_completed: 2 };
        DashboardSummary {
            regions: vec![am],
            total_value: 73250396.52,
            total_volume: 1700.5,
            total_processes: 1000,
            diagnostics: vec![CellDiagnostic {
                region: Region::Amazonas,
                line: 12,
                column: "Valor".to_string(),
                diagnostic: Diagnostic::AmbiguousFormat { raw: "1.234,56.789".to_string() },
            }],
        }
    }

    #[test]
    fn test_render_text_brazilian() {
        let text = render_text(&sample_summary(), &NumberConvention::brazilian(), "TON");
        assert!(text.contains("Consolidated overview (AM)"));
        assert!(text.contains("R$ 73.250.396,52"));
        assert!(text.contains("1.700,50 TON"));
        assert!(text.contains("Total processes (all rows):          1.000"));
        assert!(text.contains("Amazonas (AM)"));
        assert!(text.contains("(75,0%)"));
        assert!(text.contains("Completed rows with unknown navigation type: 2"));
        assert!(text.contains("AM line 12 [Valor]: ambiguous number format '1.234,56.789'"));
    }

    #[test]
    fn test_render_text_us() {
        let text = render_text(&sample_summary(), &NumberConvention::us(), "t");
        assert!(text.contains("$ 73,250,396.52"));
        assert!(text.contains("1,700.50 t"));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&sample_summary()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_processes"], 1000);
        assert_eq!(value["regions"][0]["region"], "Amazonas");
        assert_eq!(value["regions"][0]["completed"]["LongoCurso"]["operations"], 3);
        assert_eq!(value["diagnostics"][0]["diagnostic"]["kind"], "ambiguous_format");
    }
}
