//! Recovery of numbers typed into spreadsheet cells under unknown conventions.
//!
//! Exports mix `1.234,56` (pt-BR) and `1,234.56` (en-US) within a single
//! column, so the decimal mark is inferred per cell: whichever of `,` and `.`
//! appears last is the decimal separator and the other one is grouping.
//! The function never fails. Suspect cells resolve to `0.0` together with a
//! [`Diagnostic`] describing what went wrong.

use shared::models::Diagnostic;

/// Magnitudes above this are treated as corrupted cells (stray digits glued together).
pub const MAGNITUDE_CEILING: f64 = 1e12;

const PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub value: f64,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutcome {
    fn clean(value: f64) -> Self {
        Self { value, diagnostics: Vec::new() }
    }

    fn flagged(diagnostic: Diagnostic) -> Self {
        Self { value: 0.0, diagnostics: vec![diagnostic] }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[derive(Debug, PartialEq)]
struct AmbiguousSeparators;

/// Normalizes a single raw cell.
///
/// Blank cells and the `-` placeholder are zero, not missing.
pub fn normalize(raw: &str) -> ParseOutcome {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == PLACEHOLDER {
        return ParseOutcome::clean(0.0);
    }

    let stripped: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();
    // "R$ -" is the accounting spelling of zero
    if stripped == PLACEHOLDER {
        return ParseOutcome::clean(0.0);
    }

    let canonical = match canonicalize(&stripped) {
        Ok(canonical) => canonical,
        Err(AmbiguousSeparators) => {
            return ParseOutcome::flagged(Diagnostic::AmbiguousFormat { raw: raw.to_string() });
        }
    };

    match canonical.parse::<f64>() {
        // Overflowing digit runs parse to infinity and land here as well
        Ok(parsed) if !parsed.is_finite() || parsed.abs() > MAGNITUDE_CEILING => {
            let parsed = Some(parsed).filter(|p| p.is_finite());
            ParseOutcome::flagged(Diagnostic::MagnitudeOutOfBounds { raw: raw.to_string(), parsed })
        }
        Ok(parsed) => ParseOutcome::clean(parsed),
        Err(_) => ParseOutcome::flagged(Diagnostic::Unparseable { raw: raw.to_string(), canonical }),
    }
}

fn canonicalize(stripped: &str) -> Result<String, AmbiguousSeparators> {
    let canonical = match infer_decimal_separator(stripped)? {
        Some(decimal) => {
            let grouping = if decimal == ',' { '.' } else { ',' };
            stripped
                .chars()
                .filter(|&c| c != grouping)
                .map(|c| if c == decimal { '.' } else { c })
                .collect()
        }
        None => stripped.chars().filter(|&c| c != ',' && c != '.').collect(),
    };
    Ok(canonical)
}

// Rightmost separator wins. A lone kind is a decimal mark only when it occurs once;
// repeated with no opposing symbol it is grouping.
fn infer_decimal_separator(stripped: &str) -> Result<Option<char>, AmbiguousSeparators> {
    let commas = stripped.matches(',').count();
    let periods = stripped.matches('.').count();
    if commas > 1 && periods > 1 {
        return Err(AmbiguousSeparators);
    }

    match (stripped.rfind(','), stripped.rfind('.')) {
        (None, None) => Ok(None),
        (Some(_), None) => Ok((commas == 1).then_some(',')),
        (None, Some(_)) => Ok((periods == 1).then_some('.')),
        (Some(last_comma), Some(last_period)) => {
            let (decimal, occurrences) = if last_comma > last_period { (',', commas) } else { ('.', periods) };
            // "1.234,56.789": the would-be decimal mark also appears as grouping
            if occurrences > 1 {
                Err(AmbiguousSeparators)
            } else {
                Ok(Some(decimal))
            }
        }
    }
}
