// Region x navigation-type aggregation of cleaned transactions
use shared::models::{CategoryTotals, CellDiagnostic, DashboardSummary, NavigationType, Region, RegionSummary, Transaction};
use std::collections::BTreeMap;

/// Summarizes one region.
///
/// Every row counts towards `total_rows`; only completed rows contribute
/// operations, volume and value. Both navigation types are always present.
pub fn summarize_region(region: Region, transactions: &[Transaction]) -> RegionSummary {
    let mut completed: BTreeMap<NavigationType, CategoryTotals> =
        NavigationType::ALL.into_iter().map(|nav| (nav, CategoryTotals::default())).collect();
    let mut unclassified_completed: u32 = 0;

    for transaction in transactions.iter().filter(|t| t.completed) {
        match transaction.navigation {
            Some(nav) => completed.entry(nav).or_default().record(transaction.volume, transaction.value),
            None => unclassified_completed = unclassified_completed.saturating_add(1),
        }
    }

    RegionSummary {
        region,
        total_rows: saturating_count(transactions.len()),
        completed,
        unclassified_completed,
    }
}

// Counts are reported as u32 and pin at u32::MAX
fn saturating_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

// Grand totals across regions
pub fn consolidate(regions: Vec<RegionSummary>, diagnostics: Vec<CellDiagnostic>) -> DashboardSummary {
    let total_value = regions.iter().map(RegionSummary::completed_value).sum();
    let total_volume = regions.iter().map(RegionSummary::completed_volume).sum();
    let total_processes = regions.iter().fold(0u32, |total, r| total.saturating_add(r.total_rows));
    DashboardSummary {
        regions,
        total_value,
        total_volume,
        total_processes,
        diagnostics,
    }
}
