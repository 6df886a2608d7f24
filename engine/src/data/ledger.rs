// Holds cleaned transactions per region until they are summarized
use chrono::NaiveDate;
use shared::models::{CellDiagnostic, Region, Transaction};
use std::collections::HashMap;

use crate::error::EngineError;

pub struct TransactionStore {
    data: HashMap<Region, Vec<Transaction>>,
    diagnostics: Vec<CellDiagnostic>,
}

impl TransactionStore {
    pub fn new() -> Self {
        TransactionStore {
            data: HashMap::new(),
            diagnostics: Vec::new(),
        }
    }

    // Each region comes from exactly one sheet; loading it twice would double count
    pub fn add_transactions(
        &mut self,
        region: Region,
        transactions: Vec<Transaction>,
        diagnostics: Vec<CellDiagnostic>,
    ) -> Result<(), EngineError> {
        if self.data.contains_key(&region) {
            return Err(EngineError::StoreError(format!("Region {} has already been loaded", region)));
        }
        self.data.insert(region, transactions);
        self.diagnostics.extend(diagnostics);
        Ok(())
    }

    /// Rows of `region` in file order, limited to an inclusive date range.
    ///
    /// When either bound is set, undated rows are left out.
    pub fn get_transactions(&self, region: Region, from_date: Option<NaiveDate>, to_date: Option<NaiveDate>) -> Option<Vec<Transaction>> {
        let bounded = from_date.is_some() || to_date.is_some();
        self.data.get(&region).map(|transactions| {
            transactions
                .iter()
                .filter(|t| !bounded || t.date.is_some())
                .filter(|t| from_date.map_or(true, |start| t.date.map_or(false, |d| d >= start)))
                .filter(|t| to_date.map_or(true, |end| t.date.map_or(false, |d| d <= end)))
                .cloned()
                .collect()
        })
    }

    pub fn loaded_regions(&self) -> Vec<Region> {
        Region::ALL.into_iter().filter(|region| self.data.contains_key(region)).collect()
    }

    pub fn diagnostics(&self) -> &[CellDiagnostic] {
        &self.diagnostics
    }
}

impl Default for TransactionStore {
    fn default() -> Self {
        Self::new()
    }
}
