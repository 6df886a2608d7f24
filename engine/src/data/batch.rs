// Column-level normalization: one value per input cell, in input order
use super::normalizer::normalize;
use crate::error::EngineError;
use shared::models::Diagnostic;

#[derive(Debug, Clone, PartialEq)]
pub struct IndexedDiagnostic {
    /// Position of the offending cell in the input column.
    pub index: usize,
    pub diagnostic: Diagnostic,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub values: Vec<f64>,
    pub diagnostics: Vec<IndexedDiagnostic>,
}

impl BatchOutcome {
    fn absorb(&mut self, chunk: BatchOutcome, offset: usize) {
        self.values.extend(chunk.values);
        self.diagnostics.extend(chunk.diagnostics.into_iter().map(|d| IndexedDiagnostic {
            index: d.index + offset,
            diagnostic: d.diagnostic,
        }));
    }
}

pub fn normalize_cells<S: AsRef<str>>(cells: &[S]) -> BatchOutcome {
    let mut outcome = BatchOutcome { values: Vec::with_capacity(cells.len()), diagnostics: Vec::new() };
    for (index, cell) in cells.iter().enumerate() {
        let parsed = normalize(cell.as_ref());
        outcome.values.push(parsed.value);
        outcome
            .diagnostics
            .extend(parsed.diagnostics.into_iter().map(|diagnostic| IndexedDiagnostic { index, diagnostic }));
    }
    outcome
}

/// Fans a column out over the blocking pool in chunks of `chunk_size` cells
/// and reassembles the results in input order.
pub async fn normalize_cells_parallel(cells: Vec<String>, chunk_size: usize) -> Result<BatchOutcome, EngineError> {
    let chunk_size = chunk_size.max(1);
    if cells.len() <= chunk_size {
        return Ok(normalize_cells(&cells));
    }

    let mut handles = Vec::with_capacity(cells.len().div_ceil(chunk_size));
    let mut remaining = cells;
    while !remaining.is_empty() {
        let rest = remaining.split_off(chunk_size.min(remaining.len()));
        let chunk = std::mem::replace(&mut remaining, rest);
        handles.push(tokio::task::spawn_blocking(move || normalize_cells(&chunk)));
    }
    tracing::debug!(chunks = handles.len(), chunk_size, "Normalizing column in parallel");

    let mut outcome = BatchOutcome::default();
    for handle in handles {
        let offset = outcome.values.len();
        outcome.absorb(handle.await?, offset);
    }
    Ok(outcome)
}
