//! Error conversion utilities for CLI.
//!
//! Converts webarc-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::path::Path;
use webarc_core::ArchiveError;

/// Converts `ArchiveError` to user-friendly anyhow error with context
pub fn convert_archive_error(err: ArchiveError, archive: &Path) -> anyhow::Error {
    match err {
        ArchiveError::UnsupportedFormat { suffix } => {
            anyhow!(
                "Archive format not supported: '{}' (don't know how to open '{}' files)\n\
                 HINT: Supported suffixes: .warc, .warc.gz, .arc, .arc.gz (matched case-sensitively)",
                archive.display(),
                suffix
            )
        }
        ArchiveError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io_err
            )
        }
        ArchiveError::InvalidRecord(reason) | ArchiveError::InvalidHeader(reason) => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: The archive may be corrupted or truncated.",
                archive.display(),
                reason
            )
        }
        ArchiveError::RecordTooLarge { size, max } => {
            anyhow!(
                "Record in '{}' is too large ({} > {} bytes)\n\
                 HINT: Use --max-record-size to raise the limit.",
                archive.display(),
                size,
                max
            )
        }
        ArchiveError::FormatMismatch { expected, actual } => {
            anyhow!(
                "Cannot write {} records to {} archive '{}'\n\
                 HINT: Input and output must use the same format.",
                actual,
                expected,
                archive.display()
            )
        }
        _ => anyhow::Error::from(err)
            .context(format!("Error processing archive '{}'", archive.display())),
    }
}

/// Adds context to a generic error about archive operations
pub fn add_archive_context<T>(
    result: Result<T, ArchiveError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_archive_error(e, archive))
}
