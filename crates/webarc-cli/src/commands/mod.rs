//! Subcommand implementations.

pub mod cat;
pub mod completion;
pub mod copy;
pub mod detect;
pub mod list;

use crate::output::RecordEntry;
use webarc_core::Record;

/// Builds the listing view of one record.
pub fn record_entry(index: usize, offset: u64, record: &Record) -> RecordEntry {
    RecordEntry {
        index,
        offset,
        record_type: record.record_type().map(str::to_string),
        url: record.url().map(str::to_string),
        content_type: record.content_type().map(str::to_string),
        length: record.payload().len() as u64,
        headers: record.header_fields(),
    }
}
