//! Helpers shared by the WARC and ARC record engines.
//!
//! Covers opening the underlying file for a given [`OpenMode`] and the
//! line/payload primitives both framings are built from. Internal to the
//! crate.

use std::fs::File;
use std::fs::OpenOptions;
use std::io::BufRead;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::path::Path;

use crate::ArchiveConfig;
use crate::ArchiveError;
use crate::OpenMode;
use crate::Result;
use crate::io::RecordSink;
use crate::io::RecordSource;

/// Longest header line accepted before the record is rejected.
pub(crate) const MAX_LINE_LENGTH: u64 = 64 * 1024;

/// Open file behind an archive handle.
pub(crate) enum ArchiveStream {
    /// Opened for reading.
    Reader(RecordSource<BufReader<File>>),
    /// Opened for writing or appending.
    Writer(RecordSink<BufWriter<File>>),
}

impl ArchiveStream {
    /// Opens `path` for `mode`.
    ///
    /// Errors from the file system are returned unmodified as
    /// [`ArchiveError::Io`].
    pub(crate) fn open(
        path: &Path,
        mode: OpenMode,
        compress: bool,
        config: &ArchiveConfig,
    ) -> Result<Self> {
        let compression = compress.then(|| config.gzip_level());
        match mode {
            OpenMode::Read => {
                let file = File::open(path)?;
                Ok(Self::Reader(RecordSource::new(
                    BufReader::new(file),
                    compress,
                )))
            }
            OpenMode::Write => {
                let file = File::create(path)?;
                Ok(Self::Writer(RecordSink::new(
                    BufWriter::new(file),
                    compression,
                    0,
                )))
            }
            OpenMode::Append => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                let start = file.metadata()?.len();
                Ok(Self::Writer(RecordSink::new(
                    BufWriter::new(file),
                    compression,
                    start,
                )))
            }
        }
    }

    /// Returns the reader, or `ModeMismatch` for write handles.
    pub(crate) fn reader(&mut self, mode: OpenMode) -> Result<&mut RecordSource<BufReader<File>>> {
        match self {
            Self::Reader(source) => Ok(source),
            Self::Writer(_) => Err(ArchiveError::ModeMismatch {
                expected: OpenMode::Read,
                actual: mode,
            }),
        }
    }

    /// Returns the writer, or `ModeMismatch` for read handles.
    pub(crate) fn writer(&mut self, mode: OpenMode) -> Result<&mut RecordSink<BufWriter<File>>> {
        match self {
            Self::Writer(sink) => Ok(sink),
            Self::Reader(_) => Err(ArchiveError::ModeMismatch {
                expected: OpenMode::Write,
                actual: mode,
            }),
        }
    }

    /// Offset of the next record to be read or written.
    pub(crate) fn tell(&mut self) -> Result<u64> {
        match self {
            Self::Reader(source) => Ok(source.record_offset()?),
            Self::Writer(sink) => Ok(sink.position()),
        }
    }

    /// Flushes pending output and releases the file.
    pub(crate) fn close(self) -> Result<()> {
        if let Self::Writer(mut sink) = self {
            sink.flush()?;
            let file = sink
                .into_inner()
                .into_inner()
                .map_err(std::io::IntoInnerError::into_error)?;
            file.sync_all()?;
        }
        Ok(())
    }
}

/// Skips line terminators between records.
///
/// Returns `false` if the stream ended before any other byte.
pub(crate) fn skip_blank_lines<R: BufRead>(reader: &mut R) -> Result<bool> {
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(false);
        }
        let blank = buf
            .iter()
            .take_while(|&&b| b == b'\r' || b == b'\n')
            .count();
        if blank == 0 {
            return Ok(true);
        }
        reader.consume(blank);
    }
}

/// Reads one line, without its `\n` or `\r\n` terminator.
///
/// Returns `None` at end of stream. Lines longer than [`MAX_LINE_LENGTH`]
/// and lines that are not UTF-8 are rejected.
pub(crate) fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut buf = Vec::new();
    let n = reader
        .by_ref()
        .take(MAX_LINE_LENGTH)
        .read_until(b'\n', &mut buf)?;

    if n == 0 {
        return Ok(None);
    }
    if !buf.ends_with(b"\n") && n as u64 == MAX_LINE_LENGTH {
        return Err(ArchiveError::InvalidHeader(format!(
            "header line exceeds {MAX_LINE_LENGTH} bytes"
        )));
    }

    if buf.ends_with(b"\n") {
        buf.pop();
        if buf.ends_with(b"\r") {
            buf.pop();
        }
    }

    String::from_utf8(buf)
        .map(Some)
        .map_err(|e| ArchiveError::InvalidHeader(format!("header line is not UTF-8: {e}")))
}

/// Reads exactly `length` payload bytes.
pub(crate) fn read_payload<R: BufRead>(
    reader: &mut R,
    length: u64,
    config: &ArchiveConfig,
) -> Result<Vec<u8>> {
    if length > config.max_record_size {
        return Err(ArchiveError::RecordTooLarge {
            size: length,
            max: config.max_record_size,
        });
    }

    let capacity = usize::try_from(length.min(64 * 1024)).unwrap_or(0);
    let mut payload = Vec::with_capacity(capacity);
    reader.by_ref().take(length).read_to_end(&mut payload)?;

    if (payload.len() as u64) < length {
        return Err(ArchiveError::InvalidRecord(format!(
            "truncated payload: expected {length} bytes, got {}",
            payload.len()
        )));
    }
    Ok(payload)
}

/// Consumes `expected` from the stream or fails.
pub(crate) fn expect_bytes<R: BufRead>(reader: &mut R, expected: &[u8]) -> Result<()> {
    let mut found = Vec::with_capacity(expected.len());
    reader
        .by_ref()
        .take(expected.len() as u64)
        .read_to_end(&mut found)?;

    if found == expected {
        Ok(())
    } else {
        Err(ArchiveError::InvalidRecord(format!(
            "expected {:?} after payload, found {:?}",
            String::from_utf8_lossy(expected),
            String::from_utf8_lossy(&found)
        )))
    }
}
