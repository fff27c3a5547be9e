//! JSON output formatter for machine-readable results.

use super::formatter::CopySummary;
use super::formatter::Detection;
use super::formatter::JsonOutput;
use super::formatter::Listing;
use super::formatter::OutputFormatter;
use super::formatter::RecordEntry;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_detection(&self, results: &[Detection]) -> Result<()> {
        Self::output(&JsonOutput::success("detect", results))
    }

    fn format_listing(&self, listing: &Listing, _long: bool, _human_readable: bool) -> Result<()> {
        Self::output(&JsonOutput::success("list", listing))
    }

    fn format_record(&self, entry: &RecordEntry, payload: &[u8]) -> Result<()> {
        #[derive(Serialize)]
        struct RecordOutput<'a> {
            #[serde(flatten)]
            entry: &'a RecordEntry,
            payload: String,
        }

        let data = RecordOutput {
            entry,
            payload: String::from_utf8_lossy(payload).into_owned(),
        };
        Self::output(&JsonOutput::success("cat", data))
    }

    fn format_copy_result(&self, summary: &CopySummary) -> Result<()> {
        Self::output(&JsonOutput::success("copy", summary))
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("unknown", format!("{error:?}"));
        let _ = Self::output(&output);
    }

    fn format_success(&self, message: &str) {
        #[derive(Serialize)]
        struct SuccessData {
            message: String,
        }

        let output = JsonOutput::success(
            "unknown",
            SuccessData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        let output = JsonOutput::success(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }
}
