use csv::{ByteRecord, ReaderBuilder};
use encoding_rs::WINDOWS_1252;
use shared::models::Region;
use std::borrow::Cow;
use std::path::Path;

use crate::config::{ColumnMapping, CsvSettings};
use crate::error::EngineError;
use crate::models::RawTransaction;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

pub struct TransactionCsvParser;

// Column positions resolved from the header row
struct ColumnIndexes {
    navigation: usize,
    status: usize,
    date: Option<usize>,
    volume: usize,
    value: usize,
}

// Maps record start offsets to 1-based physical line numbers
struct LineCounter<'a> {
    bytes: &'a [u8],
    offset: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        LineCounter { bytes, offset: 0, line: 1 }
    }

    // Offsets must be non-decreasing. Blank lines skipped by the reader
    // before the record are stepped over.
    fn line_at(&mut self, start: usize) -> usize {
        let mut start = start.min(self.bytes.len());
        while start < self.bytes.len() && matches!(self.bytes[start], b'\r' | b'\n') {
            start += 1;
        }
        if start > self.offset {
            self.line += self.bytes[self.offset..start].iter().filter(|&&b| b == b'\n').count();
            self.offset = start;
        }
        self.line
    }
}

impl TransactionCsvParser {
    // Header: Navegação;Status;Data;Volume;Valor (names configurable, order free)
    // Example row: LONGO CURSO;CONCLUÍDO;14/03/2025;1.250,500;R$ 4.812.330,10
    // Fields are UTF-8, or Windows-1252 when a field is not valid UTF-8.
    pub fn load_raw_rows(
        file_path: &Path,
        region: Region,
        csv_settings: &CsvSettings,
        columns: &ColumnMapping,
    ) -> Result<Vec<RawTransaction>, EngineError> {
        let contents = std::fs::read(file_path)?;
        let mut rdr = ReaderBuilder::new()
            .delimiter(csv_settings.delimiter as u8)
            .has_headers(true)
            // Exports drop trailing empty cells; those read as blank (zero)
            .flexible(true)
            .from_reader(contents.as_slice());

        let headers: Vec<String> = rdr.byte_headers()?.iter().map(|field| Self::decode(field).into_owned()).collect();
        let indexes = Self::resolve_columns(&headers, columns)?;

        let mut lines = LineCounter::new(&contents);
        let mut rows = Vec::new();
        for (idx, result) in rdr.byte_records().enumerate() {
            let record = result?;
            let line = match record.position() {
                Some(pos) => lines.line_at(usize::try_from(pos.byte()).unwrap_or(usize::MAX)),
                None => idx + 2,
            };
            rows.push(RawTransaction {
                region,
                line,
                navigation: Self::cell(&record, indexes.navigation),
                status: Self::cell(&record, indexes.status),
                date: indexes.date.map(|pos| Self::cell(&record, pos)),
                volume: Self::cell(&record, indexes.volume),
                value: Self::cell(&record, indexes.value),
            });
        }

        tracing::debug!(%region, path = %file_path.display(), rows = rows.len(), "Read raw transaction rows");
        Ok(rows)
    }

    fn resolve_columns(headers: &[String], columns: &ColumnMapping) -> Result<ColumnIndexes, EngineError> {
        let required = |name: &str| {
            Self::column_index(headers, name)
                .ok_or_else(|| EngineError::CsvDataFormatError(format!("Missing '{}' column in CSV header", name)))
        };
        let date = match columns.date.as_deref() {
            Some(name) => {
                let pos = Self::column_index(headers, name);
                if pos.is_none() {
                    tracing::warn!(column = %name, "Date column not found; rows will carry no date");
                }
                pos
            }
            None => None,
        };
        Ok(ColumnIndexes {
            navigation: required(&columns.navigation)?,
            status: required(&columns.status)?,
            date,
            volume: required(&columns.volume)?,
            value: required(&columns.value)?,
        })
    }

    // Header names are matched ignoring surrounding spaces and case
    fn column_index(headers: &[String], name: &str) -> Option<usize> {
        let wanted = name.trim().to_lowercase();
        headers.iter().position(|header| header.trim().to_lowercase() == wanted)
    }

    fn decode(field: &[u8]) -> Cow<'_, str> {
        let field = field.strip_prefix(UTF8_BOM).unwrap_or(field);
        match std::str::from_utf8(field) {
            Ok(text) => Cow::Borrowed(text),
            Err(_) => WINDOWS_1252.decode_without_bom_handling(field).0,
        }
    }

    fn cell(record: &ByteRecord, pos: usize) -> String {
        record.get(pos).map(|field| Self::decode(field).into_owned()).unwrap_or_default()
    }
}
