// Turns raw rows plus their normalized numeric cells into transactions
use chrono::NaiveDate;
use shared::models::{NavigationType, Transaction};

use crate::models::RawTransaction;

const DATE_FORMATS: [&str; 2] = ["%d/%m/%Y", "%Y-%m-%d"];

// Parses "dd/mm/yyyy" (pt-BR exports) or ISO "yyyy-mm-dd"
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    let trimmed = date_str.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS.iter().find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

pub fn is_completed(status: &str, completed_statuses: &[String]) -> bool {
    let folded = status.trim().to_uppercase();
    completed_statuses.iter().any(|label| label.trim().to_uppercase() == folded)
}

pub fn clean_row(raw: RawTransaction, volume: f64, value: f64, completed_statuses: &[String]) -> Transaction {
    let navigation = NavigationType::from_label(&raw.navigation);
    let completed = is_completed(&raw.status, completed_statuses);
    if navigation.is_none() && completed {
        tracing::debug!(region = %raw.region, line = raw.line, label = %raw.navigation, "Completed row has unknown navigation type");
    }

    let date = raw.date.as_deref().and_then(|date_str| {
        let parsed = parse_date(date_str);
        if parsed.is_none() && !date_str.trim().is_empty() {
            tracing::debug!(region = %raw.region, line = raw.line, date = %date_str, "Unrecognized date format");
        }
        parsed
    });

    Transaction {
        region: raw.region,
        line: raw.line,
        navigation,
        navigation_label: raw.navigation.trim().to_string(),
        completed,
        date,
        volume,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use shared::models::Region;

    fn statuses() -> Vec<String> {
        vec!["CONCLUÍDO".to_string(), "CONCLUIDO".to_string()]
    }

    fn raw(navigation: &str, status: &str, date: Option<&str>) -> RawTransaction {
        RawTransaction {
            region: Region::Para,
            line: 7,
            navigation: navigation.to_string(),
            status: status.to_string(),
            date: date.map(str::to_string),
            volume: "ignored".to_string(),
            value: "ignored".to_string(),
        }
    }

    #[test]
    fn test_parse_date_formats() {
        let date = parse_date("30/12/2025").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2025, 12, 30));
        assert_eq!(parse_date(" 2025-01-02 "), NaiveDate::from_ymd_opt(2025, 1, 2));
    }

    #[test]
    fn test_parse_date_invalid() {
        assert_eq!(parse_date("32/12/2025"), None);
        assert_eq!(parse_date("2025/12/30"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_is_completed_folds_case() {
        assert!(is_completed("concluído", &statuses()));
        assert!(is_completed(" Concluido ", &statuses()));
        assert!(!is_completed("CANCELADO", &statuses()));
        assert!(!is_completed("", &statuses()));
    }

    #[test]
    fn test_clean_row() {
        let row = clean_row(raw(" Longo Curso ", "CONCLUÍDO", Some("14/03/2025")), 12.5, 1000.0, &statuses());
        assert_eq!(row.region, Region::Para);
        assert_eq!(row.line, 7);
        assert_eq!(row.navigation, Some(NavigationType::LongoCurso));
        assert_eq!(row.navigation_label, "Longo Curso");
        assert!(row.completed);
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2025, 3, 14));
        assert_eq!(row.volume, 12.5);
        assert_eq!(row.value, 1000.0);
    }

    #[test]
    fn test_clean_row_unknown_navigation_and_bad_date() {
        let row = clean_row(raw("REBOQUE", "PENDENTE", Some("ontem")), 0.0, 0.0, &statuses());
        assert_eq!(row.navigation, None);
        assert!(!row.completed);
        assert_eq!(row.date, None);
    }
}
