use shared::models::Region;

/// A spreadsheet record exactly as read, tagged with the region of its file.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTransaction {
    pub region: Region,
    // 1-based line in the source file; the header is line 1
    pub line: usize,
    pub navigation: String,
    pub status: String,
    pub date: Option<String>,
    pub volume: String,
    pub value: String,
}
