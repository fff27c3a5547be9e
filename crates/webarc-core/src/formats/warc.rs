//! WARC record engine.
//!
//! A WARC record is a version line, a block of `Name: value` header lines
//! terminated by an empty line, `Content-Length` bytes of payload, and a
//! closing `\r\n\r\n`. Records are written with CRLF line endings; when
//! reading, bare LF header lines are tolerated.
//!
//! # Examples
//!
//! ```no_run
//! use webarc_core::RecordFormat;
//! use webarc_core::formats::warc::WarcFile;
//! use webarc_core::formats::warc::WarcHeader;
//! use webarc_core::formats::warc::WarcRecord;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut out = WarcFile::open("crawl.warc.gz", "wb", true)?;
//! let mut header = WarcHeader::new();
//! header.set("WARC-Type", "resource");
//! header.set("WARC-Target-URI", "http://example.com/");
//! out.write_record(&WarcRecord::new(header, b"hello".to_vec()))?;
//! out.close()?;
//! # Ok(())
//! # }
//! ```

use std::io::BufRead;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveConfig;
use crate::ArchiveError;
use crate::OpenMode;
use crate::Result;
use crate::formats::common;
use crate::formats::common::ArchiveStream;
use crate::formats::traits::RecordFormat;

/// Version written by this crate.
pub const WARC_VERSION: &str = "WARC/1.0";

/// Versions accepted when reading.
pub const SUPPORTED_VERSIONS: [&str; 3] = ["WARC/1.0", "WARC/0.17", "WARC/0.18"];

/// Bytes closing every record.
const RECORD_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Well-known WARC header names.
pub mod fields {
    /// Record type (`warcinfo`, `response`, `request`, ...).
    pub const WARC_TYPE: &str = "WARC-Type";
    /// Globally unique record identifier.
    pub const RECORD_ID: &str = "WARC-Record-ID";
    /// Capture time.
    pub const DATE: &str = "WARC-Date";
    /// URI the record was captured from.
    pub const TARGET_URI: &str = "WARC-Target-URI";
    /// IP address of the server.
    pub const IP_ADDRESS: &str = "WARC-IP-Address";
    /// Digest of the payload.
    pub const PAYLOAD_DIGEST: &str = "WARC-Payload-Digest";
    /// ID of the describing `warcinfo` record.
    pub const WARCINFO_ID: &str = "WARC-Warcinfo-ID";
    /// Media type of the block.
    pub const CONTENT_TYPE: &str = "Content-Type";
    /// Length of the block in bytes.
    pub const CONTENT_LENGTH: &str = "Content-Length";
}

/// Header block of a WARC record.
///
/// Field names compare case-insensitively; insertion order is preserved
/// when the header is written back out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarcHeader {
    version: String,
    fields: Vec<(String, String)>,
}

impl Default for WarcHeader {
    fn default() -> Self {
        Self {
            version: WARC_VERSION.to_string(),
            fields: Vec::new(),
        }
    }
}

impl WarcHeader {
    /// Creates an empty `WARC/1.0` header.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the version line, e.g. `WARC/1.0`.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the value of `name`, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Sets `name` to `value`, replacing an existing field in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .fields
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            Some(field) => field.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Removes `name` and returns its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self
            .fields
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))?;
        Some(self.fields.remove(index).1)
    }

    /// Iterates over `(name, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no fields are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `WARC-Type` value.
    #[must_use]
    pub fn record_type(&self) -> Option<&str> {
        self.get(fields::WARC_TYPE)
    }

    /// `WARC-Record-ID` value.
    #[must_use]
    pub fn record_id(&self) -> Option<&str> {
        self.get(fields::RECORD_ID)
    }

    /// `WARC-Date` value.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.get(fields::DATE)
    }

    /// `WARC-Target-URI` value.
    #[must_use]
    pub fn target_uri(&self) -> Option<&str> {
        self.get(fields::TARGET_URI)
    }

    /// `WARC-IP-Address` value.
    #[must_use]
    pub fn ip_address(&self) -> Option<&str> {
        self.get(fields::IP_ADDRESS)
    }

    /// `WARC-Payload-Digest` value.
    #[must_use]
    pub fn payload_digest(&self) -> Option<&str> {
        self.get(fields::PAYLOAD_DIGEST)
    }

    /// `Content-Type` value.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.get(fields::CONTENT_TYPE)
    }

    /// `Content-Length` parsed as a byte count.
    #[must_use]
    pub fn content_length(&self) -> Option<u64> {
        self.get(fields::CONTENT_LENGTH)
            .and_then(|v| v.trim().parse().ok())
    }

    /// Checks that every field survives a write and read unchanged.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHeader` for a name that is empty or contains `:`,
    /// whitespace or control characters, and for a value holding a line
    /// break.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in &self.fields {
            if !is_field_name(name) {
                return Err(ArchiveError::InvalidHeader(format!(
                    "bad header name: {name:?}"
                )));
            }
            if value.contains(['\r', '\n']) {
                return Err(ArchiveError::InvalidHeader(format!(
                    "line break in value of {name}: {value:?}"
                )));
            }
        }
        Ok(())
    }

    /// Serializes the version line, fields and the blank separator line.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut text = String::with_capacity(self.version.len() + 32 * self.fields.len() + 4);
        text.push_str(&self.version);
        text.push_str("\r\n");
        for (name, value) in &self.fields {
            text.push_str(name);
            text.push_str(": ");
            text.push_str(value);
            text.push_str("\r\n");
        }
        text.push_str("\r\n");
        text.into_bytes()
    }

    /// Writes the version line, fields and the blank separator line.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.write_all(&self.to_bytes())
    }

    /// Parses a header block.
    ///
    /// Returns `None` if the stream is already at end of file.
    ///
    /// # Errors
    ///
    /// Returns an error for unsupported versions, malformed lines, or a
    /// header cut short by end of file.
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Option<Self>> {
        let Some(version) = common::read_line(reader)? else {
            return Ok(None);
        };
        let version = version.trim_end().to_string();
        if !version.starts_with("WARC/") {
            return Err(ArchiveError::InvalidHeader(format!(
                "bad version line: {version:?}"
            )));
        }
        if !SUPPORTED_VERSIONS.contains(&version.as_str()) {
            return Err(ArchiveError::InvalidHeader(format!(
                "unsupported WARC version: {version}"
            )));
        }

        let mut header = Self {
            version,
            fields: Vec::new(),
        };

        loop {
            let line = common::read_line(reader)?.ok_or_else(|| {
                ArchiveError::InvalidRecord("unexpected end of file in WARC header".to_string())
            })?;

            if line.is_empty() {
                break;
            }

            if line.starts_with([' ', '\t']) {
                let Some(last) = header.fields.last_mut() else {
                    return Err(ArchiveError::InvalidHeader(format!(
                        "continuation line before any field: {line:?}"
                    )));
                };
                last.1.push(' ');
                last.1.push_str(line.trim());
                continue;
            }

            let Some((name, value)) = line.split_once(':') else {
                return Err(ArchiveError::InvalidHeader(format!(
                    "bad header line: {line:?}"
                )));
            };
            let name = name.trim();
            if !is_field_name(name) {
                return Err(ArchiveError::InvalidHeader(format!(
                    "bad header name: {line:?}"
                )));
            }
            header
                .fields
                .push((name.to_string(), value.trim().to_string()));
        }

        Ok(Some(header))
    }
}

/// One WARC record: a header and its payload block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarcRecord {
    header: WarcHeader,
    payload: Vec<u8>,
}

impl WarcRecord {
    /// Creates a record, filling in missing standard fields.
    ///
    /// `WARC-Record-ID`, `WARC-Date` and `Content-Type` are generated when
    /// absent, and `Content-Length` is always set to the payload length.
    ///
    /// # Examples
    ///
    /// ```
    /// use webarc_core::formats::warc::WarcHeader;
    /// use webarc_core::formats::warc::WarcRecord;
    ///
    /// let mut header = WarcHeader::new();
    /// header.set("WARC-Type", "warcinfo");
    /// let record = WarcRecord::new(header, b"software: webarc\r\n".to_vec());
    ///
    /// assert_eq!(record.header().content_length(), Some(18));
    /// assert_eq!(record.header().content_type(), Some("application/warc-fields"));
    /// assert!(record.header().record_id().unwrap().starts_with("<urn:uuid:"));
    /// ```
    #[must_use]
    pub fn new(mut header: WarcHeader, payload: Vec<u8>) -> Self {
        if !header.contains(fields::RECORD_ID) {
            header.set(fields::RECORD_ID, new_record_id());
        }
        if !header.contains(fields::DATE) {
            header.set(fields::DATE, current_date());
        }
        if !header.contains(fields::CONTENT_TYPE) {
            let content_type = default_content_type(header.record_type());
            header.set(fields::CONTENT_TYPE, content_type);
        }
        header.set(fields::CONTENT_LENGTH, payload.len().to_string());
        Self { header, payload }
    }

    /// Creates a record without touching the header.
    #[must_use]
    pub fn from_parts(header: WarcHeader, payload: Vec<u8>) -> Self {
        Self { header, payload }
    }

    /// Returns the header.
    #[must_use]
    pub fn header(&self) -> &WarcHeader {
        &self.header
    }

    /// Returns the header for modification.
    pub fn header_mut(&mut self) -> &mut WarcHeader {
        &mut self.header
    }

    /// Returns the payload block.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Splits the record into header and payload.
    #[must_use]
    pub fn into_parts(self) -> (WarcHeader, Vec<u8>) {
        (self.header, self.payload)
    }

    /// Serializes the record including its terminator.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        self.header.write_to(out)?;
        out.write_all(&self.payload)?;
        out.write_all(RECORD_TERMINATOR)
    }

    /// Serializes the record into a new buffer.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = self.header.to_bytes();
        buf.reserve(self.payload.len() + RECORD_TERMINATOR.len());
        buf.extend_from_slice(&self.payload);
        buf.extend_from_slice(RECORD_TERMINATOR);
        buf
    }

    /// Parses one record from a stream positioned at its version line.
    ///
    /// Returns `None` at end of file.
    ///
    /// # Errors
    ///
    /// Returns an error if the header is malformed, `Content-Length` is
    /// missing, the payload is truncated or exceeds
    /// `config.max_record_size`, or the terminator is missing.
    pub fn read_from<R: BufRead>(reader: &mut R, config: &ArchiveConfig) -> Result<Option<Self>> {
        let Some(header) = WarcHeader::read_from(reader)? else {
            return Ok(None);
        };

        let raw_length = header.get(fields::CONTENT_LENGTH).ok_or_else(|| {
            ArchiveError::InvalidHeader("missing Content-Length header".to_string())
        })?;
        let length: u64 = raw_length.trim().parse().map_err(|_| {
            ArchiveError::InvalidHeader(format!("invalid Content-Length: {raw_length:?}"))
        })?;

        let payload = common::read_payload(reader, length, config)?;
        common::expect_bytes(reader, RECORD_TERMINATOR)?;

        Ok(Some(Self { header, payload }))
    }
}

/// Header names are non-empty and free of `:`, whitespace and control
/// characters.
fn is_field_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(|c: char| c == ':' || c.is_whitespace() || c.is_control())
}

/// Generates a `<urn:uuid:...>` record identifier.
fn new_record_id() -> String {
    format!("<urn:uuid:{}>", uuid::Uuid::new_v4())
}

/// Formats the current UTC time as a WARC date.
fn current_date() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Content type implied by a record type.
fn default_content_type(record_type: Option<&str>) -> &'static str {
    match record_type {
        Some("warcinfo" | "metadata") => "application/warc-fields",
        Some("response") => "application/http; msgtype=response",
        Some("request") => "application/http; msgtype=request",
        _ => "application/octet-stream",
    }
}

/// Open WARC file.
///
/// Created for one [`OpenMode`]; reading operations on a write handle (and
/// vice versa) fail with [`ArchiveError::ModeMismatch`].
pub struct WarcFile {
    path: PathBuf,
    mode: OpenMode,
    compressed: bool,
    config: ArchiveConfig,
    stream: ArchiveStream,
}

impl std::fmt::Debug for WarcFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WarcFile")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .field("compressed", &self.compressed)
            .finish_non_exhaustive()
    }
}

impl WarcFile {
    /// Opens a WARC file with the default configuration.
    ///
    /// `compress` selects one-gzip-member-per-record storage.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedMode` for unknown mode strings and `Io` if the
    /// file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P, mode: &str, compress: bool) -> Result<Self> {
        Self::open_with_config(path, mode, compress, &ArchiveConfig::default())
    }

    /// Opens a WARC file with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedMode`, `InvalidConfig`, or `Io`.
    pub fn open_with_config<P: AsRef<Path>>(
        path: P,
        mode: &str,
        compress: bool,
        config: &ArchiveConfig,
    ) -> Result<Self> {
        let path = path.as_ref();
        let mode: OpenMode = mode.parse()?;
        config.validate()?;

        let stream = ArchiveStream::open(path, mode, compress, config)?;
        tracing::debug!(path = %path.display(), %mode, compress, "opened WARC file");

        Ok(Self {
            path: path.to_path_buf(),
            mode,
            compressed: compress,
            config: config.clone(),
            stream,
        })
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the mode the file was opened with.
    #[must_use]
    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    /// Returns `true` if records are stored as gzip members.
    #[must_use]
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Flushes pending output and closes the file.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    pub fn close(self) -> Result<()> {
        tracing::debug!(path = %self.path.display(), "closing WARC file");
        self.stream.close()
    }
}

impl RecordFormat for WarcFile {
    type Record = WarcRecord;

    fn format_name(&self) -> &'static str {
        "warc"
    }

    fn next_record(&mut self) -> Result<Option<(WarcRecord, u64)>> {
        let Self {
            stream,
            mode,
            config,
            ..
        } = self;
        let source = stream.reader(*mode)?;
        if !common::skip_blank_lines(source)? {
            return Ok(None);
        }
        let offset = source.record_offset()?;

        let record = WarcRecord::read_from(source, config)?;
        if let Some(record) = &record {
            tracing::trace!(
                offset,
                record_type = record.header().record_type().unwrap_or("-"),
                length = record.payload().len(),
                "read WARC record"
            );
        }
        Ok(record.map(|r| (r, offset)))
    }

    fn write_record(&mut self, record: &WarcRecord) -> Result<u64> {
        let sink = self.stream.writer(self.mode)?;
        record.header.validate()?;
        let offset = sink.write_record(&record.to_bytes())?;
        tracing::trace!(offset, length = record.payload().len(), "wrote WARC record");
        Ok(offset)
    }

    fn tell(&mut self) -> Result<u64> {
        self.stream.tell()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::sample_warc_bytes;
    use crate::test_utils::warc_record;
    use tempfile::TempDir;

    #[test]
    fn test_header_case_insensitive_lookup() {
        let mut header = WarcHeader::new();
        header.set("WARC-Type", "response");
        assert_eq!(header.get("warc-type"), Some("response"));
        assert_eq!(header.record_type(), Some("response"));
        assert!(header.contains("WARC-TYPE"));
    }

    #[test]
    fn test_header_set_replaces_in_place() {
        let mut header = WarcHeader::new();
        header.set("WARC-Type", "request");
        header.set("Content-Length", "0");
        header.set("warc-type", "response");
        assert_eq!(header.len(), 2);
        let names: Vec<&str> = header.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["WARC-Type", "Content-Length"]);
        assert_eq!(header.record_type(), Some("response"));
    }

    #[test]
    fn test_header_remove() {
        let mut header = WarcHeader::new();
        header.set("WARC-Type", "request");
        assert_eq!(header.remove("warc-type"), Some("request".to_string()));
        assert!(header.is_empty());
        assert_eq!(header.remove("WARC-Type"), None);
    }

    #[test]
    fn test_record_defaults() {
        let mut header = WarcHeader::new();
        header.set("WARC-Type", "response");
        let record = WarcRecord::new(header, b"HTTP/1.1 200 OK\r\n\r\n".to_vec());

        let header = record.header();
        assert_eq!(header.version(), "WARC/1.0");
        assert_eq!(header.content_length(), Some(19));
        assert_eq!(
            header.content_type(),
            Some("application/http; msgtype=response")
        );
        let date = header.date().unwrap();
        assert_eq!(date.len(), 20);
        assert!(date.ends_with('Z'));
        assert!(header.record_id().unwrap().ends_with('>'));
    }

    #[test]
    fn test_record_defaults_keep_existing_values() {
        let mut header = WarcHeader::new();
        header.set("WARC-Record-ID", "<urn:uuid:fixed>");
        header.set("WARC-Date", "2012-01-01T00:00:00Z");
        header.set("Content-Type", "text/plain");
        header.set("Content-Length", "999");
        let record = WarcRecord::new(header, b"abc".to_vec());

        assert_eq!(record.header().record_id(), Some("<urn:uuid:fixed>"));
        assert_eq!(record.header().date(), Some("2012-01-01T00:00:00Z"));
        assert_eq!(record.header().content_type(), Some("text/plain"));
        assert_eq!(record.header().content_length(), Some(3));
    }

    #[test]
    fn test_default_content_types() {
        assert_eq!(
            default_content_type(Some("warcinfo")),
            "application/warc-fields"
        );
        assert_eq!(
            default_content_type(Some("metadata")),
            "application/warc-fields"
        );
        assert_eq!(
            default_content_type(Some("request")),
            "application/http; msgtype=request"
        );
        assert_eq!(
            default_content_type(Some("resource")),
            "application/octet-stream"
        );
        assert_eq!(default_content_type(None), "application/octet-stream");
    }

    #[test]
    fn test_serialized_layout() {
        let mut header = WarcHeader::new();
        header.set("WARC-Type", "resource");
        header.set("Content-Length", "2");
        let record = WarcRecord::from_parts(header, b"hi".to_vec());
        assert_eq!(
            record.to_bytes(),
            b"WARC/1.0\r\nWARC-Type: resource\r\nContent-Length: 2\r\n\r\nhi\r\n\r\n"
        );
    }

    #[test]
    fn test_read_record() {
        let data = sample_warc_bytes();
        let mut reader = &data[..];
        let config = ArchiveConfig::default();

        let first = WarcRecord::read_from(&mut reader, &config)
            .unwrap()
            .unwrap();
        assert_eq!(first.header().record_type(), Some("warcinfo"));

        common::skip_blank_lines(&mut reader).unwrap();
        let second = WarcRecord::read_from(&mut reader, &config)
            .unwrap()
            .unwrap();
        assert_eq!(second.header().target_uri(), Some("http://example.com/"));
        assert_eq!(second.payload(), b"<html>example</html>");

        common::skip_blank_lines(&mut reader).unwrap();
        assert!(WarcRecord::read_from(&mut reader, &config).unwrap().is_none());
    }

    #[test]
    fn test_read_lf_only_header() {
        let data = b"WARC/1.0\nWARC-Type: resource\nContent-Length: 3\n\nabc\r\n\r\n";
        let record = WarcRecord::read_from(&mut &data[..], &ArchiveConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(record.payload(), b"abc");
    }

    #[test]
    fn test_read_continuation_line() {
        let data = b"WARC/1.0\r\nX-Note: first\r\n  second\r\nContent-Length: 0\r\n\r\n\r\n\r\n";
        let record = WarcRecord::read_from(&mut &data[..], &ArchiveConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(record.header().get("X-Note"), Some("first second"));
    }

    #[test]
    fn test_read_older_versions() {
        for version in ["WARC/0.17", "WARC/0.18"] {
            let data = format!("{version}\r\nContent-Length: 0\r\n\r\n\r\n\r\n");
            let record = WarcRecord::read_from(&mut data.as_bytes(), &ArchiveConfig::default())
                .unwrap()
                .unwrap();
            assert_eq!(record.header().version(), version);
        }
    }

    #[test]
    fn test_read_rejects_bad_version() {
        let data = b"HTTP/1.1 200 OK\r\n\r\n";
        assert!(matches!(
            WarcRecord::read_from(&mut &data[..], &ArchiveConfig::default()),
            Err(ArchiveError::InvalidHeader(_))
        ));

        let data = b"WARC/2.5\r\nContent-Length: 0\r\n\r\n\r\n\r\n";
        let err = WarcRecord::read_from(&mut &data[..], &ArchiveConfig::default()).unwrap_err();
        assert!(err.to_string().contains("unsupported WARC version"));
    }

    #[test]
    fn test_read_rejects_missing_content_length() {
        let data = b"WARC/1.0\r\nWARC-Type: resource\r\n\r\n\r\n\r\n";
        let err = WarcRecord::read_from(&mut &data[..], &ArchiveConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Content-Length"));
    }

    #[test]
    fn test_read_rejects_bad_header_line() {
        let data = b"WARC/1.0\r\nno colon here\r\n\r\n";
        assert!(matches!(
            WarcRecord::read_from(&mut &data[..], &ArchiveConfig::default()),
            Err(ArchiveError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_read_rejects_truncated_header() {
        let data = b"WARC/1.0\r\nWARC-Type: resource\r\n";
        assert!(matches!(
            WarcRecord::read_from(&mut &data[..], &ArchiveConfig::default()),
            Err(ArchiveError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_read_rejects_missing_terminator() {
        let data = b"WARC/1.0\r\nContent-Length: 3\r\n\r\nabcWARC/1.0";
        assert!(matches!(
            WarcRecord::read_from(&mut &data[..], &ArchiveConfig::default()),
            Err(ArchiveError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_validate_rejects_unwritable_fields() {
        let mut header = WarcHeader::new();
        header.set("WARC-Type", "resource");
        assert!(header.validate().is_ok());

        header.set("X-Note", "a\r\nWARC-Type: forged");
        assert!(matches!(
            header.validate(),
            Err(ArchiveError::InvalidHeader(_))
        ));

        for name in ["", "X Note", "X:Note", "X-Note\t"] {
            let mut header = WarcHeader::new();
            header.set(name, "value");
            assert!(header.validate().is_err(), "{name:?}");
        }
    }

    #[test]
    fn test_file_rejects_line_break_in_value() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.warc");

        let mut out = WarcFile::open(&path, "w", false).unwrap();
        let mut bad = warc_record("http://example.com/", b"x");
        bad.header_mut().set("X-Note", "a\r\nb");
        assert!(matches!(
            out.write_record(&bad),
            Err(ArchiveError::InvalidHeader(_))
        ));
        assert_eq!(out.tell().unwrap(), 0);

        let mut good = warc_record("http://example.com/", b"x");
        good.header_mut().set("X-Note", "a b");
        out.write_record(&good).unwrap();
        out.close().unwrap();

        let mut input = WarcFile::open(&path, "r", false).unwrap();
        let records: Vec<WarcRecord> = input.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].header().get("X-Note"), Some("a b"));
    }

    #[test]
    fn test_file_write_then_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.warc");

        let mut out = WarcFile::open(&path, "wb", false).unwrap();
        let first = out
            .write_record(&warc_record("http://example.com/a", b"aaa"))
            .unwrap();
        let second = out
            .write_record(&warc_record("http://example.com/b", b"bbbb"))
            .unwrap();
        assert_eq!(first, 0);
        assert!(second > first);
        out.close().unwrap();

        let mut input = WarcFile::open(&path, "rb", false).unwrap();
        let entries: Vec<(WarcRecord, u64)> = input.browse().map(|r| r.unwrap()).collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].1, first);
        assert_eq!(entries[1].1, second);
        assert_eq!(entries[1].0.payload(), b"bbbb");
    }

    #[test]
    fn test_file_compressed_offsets_are_member_starts() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.warc.gz");

        let mut out = WarcFile::open(&path, "wb", true).unwrap();
        let mut offsets = Vec::new();
        for i in 0..3 {
            let uri = format!("http://example.com/{i}");
            offsets.push(out.write_record(&warc_record(&uri, b"payload")).unwrap());
        }
        out.close().unwrap();

        let bytes = std::fs::read(&path).unwrap();
        for offset in &offsets {
            let offset = usize::try_from(*offset).unwrap();
            assert_eq!(&bytes[offset..offset + 2], &[0x1f, 0x8b]);
        }

        let mut input = WarcFile::open(&path, "rb", true).unwrap();
        let read: Vec<u64> = input.browse().map(|r| r.unwrap().1).collect();
        assert_eq!(read, offsets);
    }

    #[test]
    fn test_file_mode_mismatch() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.warc");

        let mut out = WarcFile::open(&path, "w", false).unwrap();
        assert!(matches!(
            out.read_record(),
            Err(ArchiveError::ModeMismatch {
                expected: OpenMode::Read,
                actual: OpenMode::Write
            })
        ));
        out.close().unwrap();

        let mut input = WarcFile::open(&path, "r", false).unwrap();
        assert!(matches!(
            input.write_record(&warc_record("http://example.com/", b"")),
            Err(ArchiveError::ModeMismatch { .. })
        ));
        assert!(input.read_record().unwrap().is_none());
    }

    #[test]
    fn test_file_rejects_unknown_mode() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.warc");
        assert!(matches!(
            WarcFile::open(&path, "rw", false),
            Err(ArchiveError::UnsupportedMode { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_record_size_limit() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("big.warc");
        let mut out = WarcFile::open(&path, "w", false).unwrap();
        out.write_record(&warc_record("http://example.com/", &[b'x'; 100]))
            .unwrap();
        out.close().unwrap();

        let config = ArchiveConfig::default().with_max_record_size(10);
        let mut input = WarcFile::open_with_config(&path, "r", false, &config).unwrap();
        assert!(matches!(
            input.read_record(),
            Err(ArchiveError::RecordTooLarge { size: 100, max: 10 })
        ));
    }
}
