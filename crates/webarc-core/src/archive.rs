//! Unified archive handle and builder.

use std::io::Cursor;
use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveConfig;
use crate::ArchiveError;
use crate::OpenMode;
use crate::Result;
use crate::formats::arc::ArcFile;
use crate::formats::arc::ArcRecord;
use crate::formats::traits::RecordFormat;
use crate::formats::warc::WarcFile;
use crate::formats::warc::WarcRecord;

/// An open archive of either format.
///
/// Returned by [`open`](crate::open). Reading is forward-only; dropping the
/// handle releases the file and flushes buffered output on a best-effort
/// basis. Call [`ArchiveFile::close`] to observe flush errors.
#[derive(Debug)]
pub enum ArchiveFile {
    /// WARC archive.
    Warc(WarcFile),
    /// ARC archive.
    Arc(ArcFile),
}

impl ArchiveFile {
    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Warc(file) => file.path(),
            Self::Arc(file) => file.path(),
        }
    }

    /// Returns the mode the archive was opened with.
    #[must_use]
    pub fn mode(&self) -> OpenMode {
        match self {
            Self::Warc(file) => file.mode(),
            Self::Arc(file) => file.mode(),
        }
    }

    /// Returns `true` if records are stored as gzip members.
    #[must_use]
    pub fn is_compressed(&self) -> bool {
        match self {
            Self::Warc(file) => file.is_compressed(),
            Self::Arc(file) => file.is_compressed(),
        }
    }

    /// Flushes pending output and closes the file.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing or syncing the file fails.
    pub fn close(self) -> Result<()> {
        match self {
            Self::Warc(file) => file.close(),
            Self::Arc(file) => file.close(),
        }
    }
}

impl From<WarcFile> for ArchiveFile {
    fn from(file: WarcFile) -> Self {
        Self::Warc(file)
    }
}

impl From<ArcFile> for ArchiveFile {
    fn from(file: ArcFile) -> Self {
        Self::Arc(file)
    }
}

impl RecordFormat for ArchiveFile {
    type Record = Record;

    fn format_name(&self) -> &'static str {
        match self {
            Self::Warc(file) => file.format_name(),
            Self::Arc(file) => file.format_name(),
        }
    }

    fn next_record(&mut self) -> Result<Option<(Record, u64)>> {
        match self {
            Self::Warc(file) => Ok(file
                .next_record()?
                .map(|(record, offset)| (Record::Warc(record), offset))),
            Self::Arc(file) => Ok(file
                .next_record()?
                .map(|(record, offset)| (Record::Arc(record), offset))),
        }
    }

    fn write_record(&mut self, record: &Record) -> Result<u64> {
        match (self, record) {
            (Self::Warc(file), Record::Warc(record)) => file.write_record(record),
            (Self::Arc(file), Record::Arc(record)) => file.write_record(record),
            (file, record) => Err(ArchiveError::FormatMismatch {
                expected: file.format_name(),
                actual: record.format_name(),
            }),
        }
    }

    fn tell(&mut self) -> Result<u64> {
        match self {
            Self::Warc(file) => file.tell(),
            Self::Arc(file) => file.tell(),
        }
    }
}

/// A record of either format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// WARC record.
    Warc(WarcRecord),
    /// ARC record.
    Arc(ArcRecord),
}

impl Record {
    /// Returns the format name of the record.
    #[must_use]
    pub const fn format_name(&self) -> &'static str {
        match self {
            Self::Warc(_) => "warc",
            Self::Arc(_) => "arc",
        }
    }

    /// Returns the header as ordered `(name, value)` pairs.
    ///
    /// WARC field names are returned as written in the file; ARC fields use
    /// fixed lowercase names (`url`, `ip_address`, ...).
    #[must_use]
    pub fn header_fields(&self) -> Vec<(String, String)> {
        match self {
            Self::Warc(record) => record
                .header()
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            Self::Arc(record) => record
                .header()
                .fields()
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }

    /// Returns the payload bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        match self {
            Self::Warc(record) => record.payload(),
            Self::Arc(record) => record.payload(),
        }
    }

    /// Returns a reader over the payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Read;
    ///
    /// use webarc_core::Record;
    /// use webarc_core::formats::arc::ArcHeader;
    /// use webarc_core::formats::arc::ArcRecord;
    ///
    /// let header = ArcHeader::new("http://example.com/", "text/plain");
    /// let record = Record::Arc(ArcRecord::new(header, b"hello".to_vec()));
    ///
    /// let mut body = String::new();
    /// record.payload_reader().read_to_string(&mut body).unwrap();
    /// assert_eq!(body, "hello");
    /// ```
    #[must_use]
    pub fn payload_reader(&self) -> Cursor<&[u8]> {
        Cursor::new(self.payload())
    }

    /// Returns the captured URL, if the record has one.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Warc(record) => record.header().target_uri(),
            Self::Arc(record) => Some(&record.header().url),
        }
    }

    /// Returns the WARC record type; ARC records have none.
    #[must_use]
    pub fn record_type(&self) -> Option<&str> {
        match self {
            Self::Warc(record) => record.header().record_type(),
            Self::Arc(_) => None,
        }
    }

    /// Returns the media type of the payload.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::Warc(record) => record.header().content_type(),
            Self::Arc(record) => Some(&record.header().content_type),
        }
    }
}

impl From<WarcRecord> for Record {
    fn from(record: WarcRecord) -> Self {
        Self::Warc(record)
    }
}

impl From<ArcRecord> for Record {
    fn from(record: ArcRecord) -> Self {
        Self::Arc(record)
    }
}

/// Builder for opening archives with non-default settings.
///
/// # Examples
///
/// ```no_run
/// use webarc_core::ArchiveConfig;
/// use webarc_core::ArchiveOpener;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let archive = ArchiveOpener::new()
///     .path("crawl.warc.gz")
///     .mode("w")
///     .config(ArchiveConfig::default().with_compression_level(Some(9)))
///     .open()?;
/// archive.close()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ArchiveOpener {
    path: Option<PathBuf>,
    mode: Option<String>,
    config: Option<ArchiveConfig>,
}

impl ArchiveOpener {
    /// Creates a new `ArchiveOpener`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the archive path.
    #[must_use]
    pub fn path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the access mode string (defaults to `"r"`).
    #[must_use]
    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: ArchiveConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Opens the archive with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if no path was set, otherwise whatever
    /// [`open_with_config`](crate::open_with_config) returns.
    pub fn open(self) -> Result<ArchiveFile> {
        let path = self
            .path
            .ok_or_else(|| ArchiveError::InvalidConfig("archive path not set".to_string()))?;
        let mode = self.mode.unwrap_or_else(|| "r".to_string());
        let config = self.config.unwrap_or_default();

        crate::api::open_with_config(path, &mode, &config)
    }
}
