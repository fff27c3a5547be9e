//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;

/// Format and compression detected for one file name.
#[derive(Debug, Serialize)]
pub struct Detection {
    pub path: String,
    pub format: String,
    pub recognized: bool,
    pub compressed: bool,
}

/// One record of an archive listing.
#[derive(Debug, Serialize)]
pub struct RecordEntry {
    pub index: usize,
    pub offset: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub length: u64,
    pub headers: Vec<(String, String)>,
}

/// Records listed from one archive.
#[derive(Debug, Serialize)]
pub struct Listing {
    pub archive: String,
    pub format: String,
    pub compressed: bool,
    pub records: Vec<RecordEntry>,
}

impl Listing {
    pub fn total_length(&self) -> u64 {
        self.records.iter().map(|r| r.length).sum()
    }
}

/// Outcome of copying records between archives.
#[derive(Debug, Serialize)]
pub struct CopySummary {
    pub input: String,
    pub output: String,
    pub format: String,
    pub compressed: bool,
    pub records_copied: u64,
    pub bytes_written: u64,
}

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format detection results for a list of file names
    fn format_detection(&self, results: &[Detection]) -> Result<()>;

    /// Format a record listing
    fn format_listing(&self, listing: &Listing, long: bool, human_readable: bool) -> Result<()>;

    /// Format one record's payload
    fn format_record(&self, entry: &RecordEntry, payload: &[u8]) -> Result<()>;

    /// Format copy result
    fn format_copy_result(&self, summary: &CopySummary) -> Result<()>;

    /// Format error message
    #[allow(dead_code)]
    fn format_error(&self, error: &anyhow::Error);

    /// Format success message
    #[allow(dead_code)]
    fn format_success(&self, message: &str);

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    #[allow(dead_code)]
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }

    #[allow(dead_code)]
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> JsonOutput<()> {
        JsonOutput {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
