//! High-level public API for opening archives.

use std::path::Path;

use crate::ArchiveConfig;
use crate::ArchiveError;
use crate::Result;
use crate::archive::ArchiveFile;
use crate::formats::arc::ArcFile;
use crate::formats::detect::FormatTag;
use crate::formats::detect::detect_path_compression;
use crate::formats::detect::detect_path_format;
use crate::formats::traits::RecordFormat;
use crate::formats::warc::WarcFile;

/// Opens a WARC or ARC archive, choosing the engine from the file name.
///
/// Names ending in `.warc` or `.warc.gz` open a WARC archive, `.arc` or
/// `.arc.gz` an ARC archive; a trailing `.gz` selects per-record gzip
/// members. Matching is case-sensitive.
///
/// `mode` is one of `r`/`rb`, `w`/`wb`, `a`/`ab` (or `read`, `write`,
/// `append`); it is interpreted by the record engine.
///
/// # Errors
///
/// Returns `UnsupportedFormat` carrying the text after the last dot if the
/// name has no supported suffix. Errors from the record engine, such as
/// `UnsupportedMode` or an `Io` error for a missing file, are returned
/// unmodified.
///
/// # Examples
///
/// ```no_run
/// use webarc_core::RecordFormat;
/// use webarc_core::open;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut archive = open("crawl.warc.gz", "rb")?;
/// for record in archive.records() {
///     let record = record?;
///     println!("{:?} {} bytes", record.url(), record.payload().len());
/// }
/// # Ok(())
/// # }
/// ```
pub fn open<P: AsRef<Path>>(path: P, mode: &str) -> Result<ArchiveFile> {
    open_with_config(path, mode, &ArchiveConfig::default())
}

/// Opens an archive with an explicit configuration.
///
/// # Errors
///
/// See [`open`]. Additionally returns `InvalidConfig` if `config` fails
/// validation.
pub fn open_with_config<P: AsRef<Path>>(
    path: P,
    mode: &str,
    config: &ArchiveConfig,
) -> Result<ArchiveFile> {
    let path = path.as_ref();
    dispatch(
        path,
        |compress| WarcFile::open_with_config(path, mode, compress, config).map(ArchiveFile::Warc),
        |compress| ArcFile::open_with_config(path, mode, compress, config).map(ArchiveFile::Arc),
    )
}

/// Detects format and compression for `path` and runs the matching
/// constructor.
fn dispatch<T>(
    path: &Path,
    open_warc: impl FnOnce(bool) -> Result<T>,
    open_arc: impl FnOnce(bool) -> Result<T>,
) -> Result<T> {
    let format = detect_path_format(path);
    let compress = detect_path_compression(path);
    tracing::debug!(
        path = %path.display(),
        format = format.name(),
        compress,
        "dispatching archive open"
    );

    match format {
        FormatTag::Warc => open_warc(compress),
        FormatTag::Arc => open_arc(compress),
        FormatTag::Unrecognized(suffix) => Err(ArchiveError::UnsupportedFormat { suffix }),
    }
}

/// Copies every remaining record from `source` to `dest`.
///
/// Returns the number of records copied. Stops at the first error.
///
/// # Errors
///
/// Returns an error if reading from `source` or writing to `dest` fails,
/// including `FormatMismatch` when copying between unified handles of
/// different formats.
pub fn copy_records<S, D>(source: &mut S, dest: &mut D) -> Result<u64>
where
    S: RecordFormat,
    D: RecordFormat<Record = S::Record>,
{
    let mut copied = 0;
    for record in source.records() {
        dest.write_record(&record?)?;
        copied += 1;
    }
    tracing::debug!(copied, "copied records");
    Ok(copied)
}
