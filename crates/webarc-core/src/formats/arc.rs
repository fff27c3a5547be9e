//! ARC record engine.
//!
//! ARC is the pre-WARC web-archive format. Each record is a single
//! space-separated header line, the payload, and a newline. Every file
//! starts with a `filedesc://` record whose body names the format version
//! and the field layout of the following header lines.

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

/// URL scheme of the file header record.
const FILEDESC_SCHEME: &str = "filedesc://";

/// Placeholder for absent ARC fields.
const MISSING: &str = "-";

/// ARC header line layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArcVersion {
    /// `url ip date content-type length`
    V1,
    /// `url ip date content-type result-code checksum location offset
    /// filename length`
    #[default]
    V2,
}

impl ArcVersion {
    /// Version number written in the file header.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
        }
    }

    /// Field-name line written in the file header body.
    #[must_use]
    pub const fn field_names(self) -> &'static str {
        match self {
            Self::V1 => "URL IP-address Archive-date Content-type Archive-length",
            Self::V2 => {
                "URL IP-address Archive-date Content-type Result-code Checksum Location Offset Filename Archive-length"
            }
        }
    }

    /// Number of fields in a header line.
    #[must_use]
    pub const fn field_count(self) -> usize {
        match self {
            Self::V1 => 5,
            Self::V2 => 10,
        }
    }

    fn from_number(number: &str) -> Result<Self> {
        match number {
            "1" => Ok(Self::V1),
            "2" => Ok(Self::V2),
            other => Err(ArchiveError::InvalidRecord(format!(
                "unsupported ARC version: {other:?}"
            ))),
        }
    }
}

/// Header line of an ARC record.
///
/// The `result_code` through `filename` fields only exist in version 2
/// headers; they are written as `-` when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcHeader {
    /// Captured URL.
    pub url: String,
    /// IP address of the server.
    pub ip_address: String,
    /// Capture time as `YYYYMMDDhhmmss`.
    pub date: String,
    /// Media type of the payload.
    pub content_type: String,
    /// Payload length in bytes.
    pub length: u64,
    /// HTTP status code (version 2).
    pub result_code: Option<String>,
    /// Payload checksum (version 2).
    pub checksum: Option<String>,
    /// Redirect location (version 2).
    pub location: Option<String>,
    /// Offset of the record in its file (version 2).
    pub offset: Option<String>,
    /// Name of the file holding the record (version 2).
    pub filename: Option<String>,
}

impl ArcHeader {
    /// Creates a header stamped with the current time and length zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use webarc_core::formats::arc::ArcHeader;
    ///
    /// let header = ArcHeader::new("http://example.com/", "text/html");
    /// assert_eq!(header.ip_address, "0.0.0.0");
    /// assert_eq!(header.date.len(), 14);
    /// ```
    #[must_use]
    pub fn new(url: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ip_address: "0.0.0.0".to_string(),
            date: current_date(),
            content_type: content_type.into(),
            length: 0,
            result_code: None,
            checksum: None,
            location: None,
            offset: None,
            filename: None,
        }
    }

    /// Parses a header line; the field count selects the version.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRecord` if the line has neither 5 nor 10 fields and
    /// `InvalidHeader` if the length is not a number.
    pub fn parse(line: &str) -> Result<(Self, ArcVersion)> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let version = match parts.len() {
            5 => ArcVersion::V1,
            10 => ArcVersion::V2,
            n => {
                return Err(ArchiveError::InvalidRecord(format!(
                    "expected 5 or 10 fields in ARC header, found {n}: {line:?}"
                )));
            }
        };

        let raw_length = parts[parts.len() - 1];
        let length = raw_length.parse().map_err(|_| {
            ArchiveError::InvalidHeader(format!("invalid ARC record length: {raw_length:?}"))
        })?;

        let optional = |i: usize| (version == ArcVersion::V2).then(|| parts[i].to_string());

        let header = Self {
            url: parts[0].to_string(),
            ip_address: parts[1].to_string(),
            date: parts[2].to_string(),
            content_type: parts[3].to_string(),
            length,
            result_code: optional(4),
            checksum: optional(5),
            location: optional(6),
            offset: optional(7),
            filename: optional(8),
        };
        Ok((header, version))
    }

    /// Formats the header line (without newline) for `version`.
    #[must_use]
    pub fn to_line(&self, version: ArcVersion) -> String {
        match version {
            ArcVersion::V1 => format!(
                "{} {} {} {} {}",
                self.url, self.ip_address, self.date, self.content_type, self.length
            ),
            ArcVersion::V2 => {
                let or_missing = |field: &Option<String>| {
                    field
                        .as_deref()
                        .filter(|v| !v.is_empty())
                        .unwrap_or(MISSING)
                        .to_string()
                };
                format!(
                    "{} {} {} {} {} {} {} {} {} {}",
                    self.url,
                    self.ip_address,
                    self.date,
                    self.content_type,
                    or_missing(&self.result_code),
                    or_missing(&self.checksum),
                    or_missing(&self.location),
                    or_missing(&self.offset),
                    or_missing(&self.filename),
                    self.length
                )
            }
        }
    }

    /// Checks that the header can be written as a `version` line and parsed
    /// back with the same fields.
    ///
    /// Fields are separated by spaces, so every written field must be a
    /// single non-empty token. Empty version 2 fields are written as `-`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHeader` naming the first offending field.
    pub fn validate(&self, version: ArcVersion) -> Result<()> {
        let required = [
            ("url", self.url.as_str()),
            ("ip_address", self.ip_address.as_str()),
            ("date", self.date.as_str()),
            ("content_type", self.content_type.as_str()),
        ];
        for (name, value) in required {
            check_token(name, value)?;
        }

        if version == ArcVersion::V2 {
            let optional = [
                ("result_code", &self.result_code),
                ("checksum", &self.checksum),
                ("location", &self.location),
                ("offset", &self.offset),
                ("filename", &self.filename),
            ];
            for (name, value) in optional {
                if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                    check_token(name, value)?;
                }
            }
        }
        Ok(())
    }

    /// Returns the header as ordered `(name, value)` pairs.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("url", self.url.clone()),
            ("ip_address", self.ip_address.clone()),
            ("date", self.date.clone()),
            ("content_type", self.content_type.clone()),
        ];
        let optional = [
            ("result_code", &self.result_code),
            ("checksum", &self.checksum),
            ("location", &self.location),
            ("offset", &self.offset),
            ("filename", &self.filename),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                fields.push((name, value.clone()));
            }
        }
        fields.push(("length", self.length.to_string()));
        fields
    }
}

/// One ARC record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcRecord {
    header: ArcHeader,
    payload: Vec<u8>,
}

impl ArcRecord {
    /// Creates a record, setting the header length from the payload.
    #[must_use]
    pub fn new(mut header: ArcHeader, payload: Vec<u8>) -> Self {
        header.length = payload.len() as u64;
        Self { header, payload }
    }

    /// Creates a record without touching the header.
    #[must_use]
    pub fn from_parts(header: ArcHeader, payload: Vec<u8>) -> Self {
        Self { header, payload }
    }

    /// Returns the header.
    #[must_use]
    pub fn header(&self) -> &ArcHeader {
        &self.header
    }

    /// Returns the header for modification.
    pub fn header_mut(&mut self) -> &mut ArcHeader {
        &mut self.header
    }

    /// Returns the payload.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Splits the record into header and payload.
    #[must_use]
    pub fn into_parts(self) -> (ArcHeader, Vec<u8>) {
        (self.header, self.payload)
    }

    /// Serializes the record in the given header layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn write_to<W: Write>(&self, out: &mut W, version: ArcVersion) -> std::io::Result<()> {
        out.write_all(&self.to_bytes(version))
    }

    /// Serializes the record into a new buffer.
    #[must_use]
    pub fn to_bytes(&self, version: ArcVersion) -> Vec<u8> {
        let line = self.header.to_line(version);
        let mut buf = Vec::with_capacity(line.len() + self.payload.len() + 2);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');
        buf.extend_from_slice(&self.payload);
        buf.push(b'\n');
        buf
    }

    /// Parses one record from a stream positioned at its header line.
    ///
    /// Returns `None` at end of file.
    ///
    /// # Errors
    ///
    /// Returns an error if the header line is malformed or the payload is
    /// truncated or exceeds `config.max_record_size`.
    pub fn read_from<R: BufRead>(
        reader: &mut R,
        config: &ArchiveConfig,
    ) -> Result<Option<(Self, ArcVersion)>> {
        let Some(line) = common::read_line(reader)? else {
            return Ok(None);
        };
        let (header, version) = ArcHeader::parse(&line)?;
        let payload = common::read_payload(reader, header.length, config)?;
        Ok(Some((Self { header, payload }, version)))
    }
}

/// The `filedesc://` record opening every ARC file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcFileHeader {
    /// Header layout used by the file.
    pub version: ArcVersion,
    /// Organization that produced the file.
    pub organization: String,
    /// Header line of the `filedesc://` record.
    pub header: ArcHeader,
}

impl ArcFileHeader {
    /// Builds the file header for a new file named `filename`.
    #[must_use]
    pub fn new(filename: &str, version: ArcVersion, organization: &str, ip_address: &str) -> Self {
        let mut header = ArcHeader::new(format!("{FILEDESC_SCHEME}{filename}"), "text/plain");
        header.ip_address = ip_address.to_string();
        if version == ArcVersion::V2 {
            header.result_code = Some("200".to_string());
            header.checksum = Some(MISSING.to_string());
            header.location = Some(MISSING.to_string());
            header.offset = Some("0".to_string());
            header.filename = Some(filename.to_string());
        }
        Self {
            version,
            organization: organization.to_string(),
            header,
        }
    }

    /// Body of the `filedesc://` record.
    #[must_use]
    pub fn body(&self) -> String {
        format!(
            "{} 0 {}\n{}\n",
            self.version.number(),
            self.organization,
            self.version.field_names()
        )
    }

    /// Converts the file header into the record that is written to disk.
    #[must_use]
    pub fn to_record(&self) -> ArcRecord {
        ArcRecord::new(self.header.clone(), self.body().into_bytes())
    }

    /// Interprets a record as a file header.
    ///
    /// Returns `None` if the record URL is not a `filedesc://` URL.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRecord` if the body does not start with a version
    /// line.
    pub fn from_record(record: &ArcRecord) -> Result<Option<Self>> {
        if !record.header.url.starts_with(FILEDESC_SCHEME) {
            return Ok(None);
        }

        let body = String::from_utf8_lossy(&record.payload);
        let first_line = body.lines().next().unwrap_or_default();
        let mut parts = first_line.splitn(3, ' ');
        let version = ArcVersion::from_number(parts.next().unwrap_or_default())?;
        let _reserved = parts.next();
        let organization = parts.next().unwrap_or_default().trim().to_string();

        Ok(Some(Self {
            version,
            organization,
            header: record.header.clone(),
        }))
    }
}

/// Rejects values that would not come back as one whitespace-split field.
fn check_token(name: &str, value: &str) -> Result<()> {
    if value.is_empty() || value.contains(char::is_whitespace) {
        return Err(ArchiveError::InvalidHeader(format!(
            "ARC field {name} must be a single non-empty token, got {value:?}"
        )));
    }
    Ok(())
}

/// Header layout of an existing file, from its `filedesc://` record or,
/// failing that, from its first header line.
///
/// Returns `None` if the file is missing or empty.
fn existing_version(
    path: &Path,
    compress: bool,
    config: &ArchiveConfig,
) -> Result<Option<ArcVersion>> {
    if !path.exists() {
        return Ok(None);
    }
    let mut stream = ArchiveStream::open(path, OpenMode::Read, compress, config)?;
    let source = stream.reader(OpenMode::Read)?;
    if !common::skip_blank_lines(source)? {
        return Ok(None);
    }
    let Some((first, line_version)) = ArcRecord::read_from(source, config)? else {
        return Ok(None);
    };
    let file_header = ArcFileHeader::from_record(&first)?;
    Ok(Some(file_header.map_or(line_version, |header| header.version)))
}

/// Formats the current UTC time as an ARC date.
fn current_date() -> String {
    chrono::Utc::now().format("%Y%m%d%H%M%S").to_string()
}

/// Open ARC file.
///
/// In write mode the `filedesc://` header is emitted just before the first
/// record; append mode never writes one and keeps the header layout of the
/// existing file. In read mode the file header is consumed on the first
/// read and exposed through [`ArcFile::file_header`].
pub struct ArcFile {
    path: PathBuf,
    mode: OpenMode,
    compressed: bool,
    config: ArchiveConfig,
    stream: ArchiveStream,
    version: ArcVersion,
    file_header: Option<ArcFileHeader>,
    started: bool,
}

impl std::fmt::Debug for ArcFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArcFile")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .field("compressed", &self.compressed)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl ArcFile {
    /// Opens an ARC file with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedMode` for unknown mode strings and `Io` if the
    /// file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P, mode: &str, compress: bool) -> Result<Self> {
        Self::open_with_config(path, mode, compress, &ArchiveConfig::default())
    }

    /// Opens an ARC file with an explicit configuration.
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

        let existing = match mode {
            OpenMode::Append => existing_version(path, compress, config)?,
            OpenMode::Read | OpenMode::Write => None,
        };
        let version = existing.unwrap_or(config.arc.version);

        let stream = ArchiveStream::open(path, mode, compress, config)?;
        tracing::debug!(
            path = %path.display(),
            %mode,
            compress,
            version = version.number(),
            "opened ARC file"
        );

        Ok(Self {
            path: path.to_path_buf(),
            mode,
            compressed: compress,
            config: config.clone(),
            stream,
            version,
            file_header: None,
            started: false,
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

    /// Header layout used for this file.
    ///
    /// For readers this is only known after the first read. Appenders take
    /// it from the existing file.
    #[must_use]
    pub fn version(&self) -> ArcVersion {
        self.version
    }

    /// The `filedesc://` header, once read or written.
    #[must_use]
    pub fn file_header(&self) -> Option<&ArcFileHeader> {
        self.file_header.as_ref()
    }

    /// Flushes pending output and closes the file.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    pub fn close(self) -> Result<()> {
        tracing::debug!(path = %self.path.display(), "closing ARC file");
        self.stream.close()
    }

    fn read_next(&mut self) -> Result<Option<(ArcRecord, u64)>> {
        let source = self.stream.reader(self.mode)?;
        if !common::skip_blank_lines(source)? {
            return Ok(None);
        }
        let offset = source.record_offset()?;
        let record = ArcRecord::read_from(source, &self.config)?;
        Ok(record.map(|(record, _)| (record, offset)))
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl RecordFormat for ArcFile {
    type Record = ArcRecord;

    fn format_name(&self) -> &'static str {
        "arc"
    }

    fn next_record(&mut self) -> Result<Option<(ArcRecord, u64)>> {
        // Check the mode before consuming the file header.
        self.stream.reader(self.mode)?;

        if !self.started {
            self.started = true;
            let Some((first, offset)) = self.read_next()? else {
                return Ok(None);
            };
            match ArcFileHeader::from_record(&first)? {
                Some(file_header) => {
                    tracing::debug!(
                        version = file_header.version.number(),
                        organization = %file_header.organization,
                        "read ARC file header"
                    );
                    self.version = file_header.version;
                    self.file_header = Some(file_header);
                }
                None => return Ok(Some((first, offset))),
            }
        }

        let entry = self.read_next()?;
        if let Some((record, offset)) = &entry {
            tracing::trace!(offset, url = %record.header.url, "read ARC record");
        }
        Ok(entry)
    }

    fn write_record(&mut self, record: &ArcRecord) -> Result<u64> {
        // Check the mode and fields before emitting a file header.
        self.stream.writer(self.mode)?;
        record.header.validate(self.version)?;

        if !self.started && self.mode == OpenMode::Write {
            let file_header = ArcFileHeader::new(
                &self.file_name(),
                self.version,
                &self.config.arc.organization,
                &self.config.arc.ip_address,
            );
            file_header.header.validate(self.version)?;
            let bytes = file_header.to_record().to_bytes(self.version);
            self.stream.writer(self.mode)?.write_record(&bytes)?;
            self.file_header = Some(file_header);
        }
        self.started = true;

        let bytes = record.to_bytes(self.version);
        let offset = self.stream.writer(self.mode)?.write_record(&bytes)?;
        tracing::trace!(offset, url = %record.header.url, "wrote ARC record");
        Ok(offset)
    }

    fn tell(&mut self) -> Result<u64> {
        self.stream.tell()
    }
}
