//! Plain and gzip-segmented record streams.
//!
//! Record engines read through a [`RecordSource`] and write through a
//! [`RecordSink`]; both hide whether the file is stored uncompressed or as
//! one gzip member per record.

use std::io::BufRead;
use std::io::Read;
use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;

use super::counting::CountingReader;
use super::counting::CountingWriter;
use super::segment::SegmentReader;

/// Byte stream that records are parsed from.
pub enum RecordSource<R> {
    /// Uncompressed file.
    Plain(CountingReader<R>),
    /// Concatenated gzip members.
    Segmented(SegmentReader<R>),
}

impl<R: BufRead> RecordSource<R> {
    /// Wraps `inner`, decoding gzip members when `compressed` is set.
    #[must_use]
    pub fn new(inner: R, compressed: bool) -> Self {
        if compressed {
            Self::Segmented(SegmentReader::new(inner))
        } else {
            Self::Plain(CountingReader::new(inner))
        }
    }

    /// Returns the file offset at which the next record can be located.
    ///
    /// For plain files this is the exact byte position; for compressed files
    /// it is the start of the gzip member holding the next byte.
    ///
    /// # Errors
    ///
    /// Returns an error if advancing to the next gzip member fails.
    pub fn record_offset(&mut self) -> std::io::Result<u64> {
        match self {
            Self::Plain(reader) => Ok(reader.position()),
            Self::Segmented(reader) => {
                reader.fill_buf()?;
                Ok(reader.member_offset())
            }
        }
    }
}

impl<R: BufRead> Read for RecordSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Self::Plain(reader) => reader.read(buf),
            Self::Segmented(reader) => reader.read(buf),
        }
    }
}

impl<R: BufRead> BufRead for RecordSource<R> {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        match self {
            Self::Plain(reader) => reader.fill_buf(),
            Self::Segmented(reader) => reader.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            Self::Plain(reader) => reader.consume(amt),
            Self::Segmented(reader) => reader.consume(amt),
        }
    }
}

/// Byte stream that serialized records are appended to.
///
/// With compression enabled every record becomes its own gzip member.
pub struct RecordSink<W: Write> {
    inner: CountingWriter<W>,
    compression: Option<Compression>,
    start: u64,
}

impl<W: Write> RecordSink<W> {
    /// Creates a sink whose first byte lands at file offset `start`.
    #[must_use]
    pub fn new(inner: W, compression: Option<Compression>, start: u64) -> Self {
        Self {
            inner: CountingWriter::new(inner),
            compression,
            start,
        }
    }

    /// Returns the file offset where the next record will start.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.start + self.inner.total_bytes()
    }

    /// Returns `true` if records are written as gzip members.
    #[must_use]
    pub fn is_compressed(&self) -> bool {
        self.compression.is_some()
    }

    /// Writes one serialized record and returns the offset it starts at.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or compressing fails.
    pub fn write_record(&mut self, bytes: &[u8]) -> std::io::Result<u64> {
        let offset = self.position();
        if let Some(level) = self.compression {
            let mut encoder = GzEncoder::new(&mut self.inner, level);
            encoder.write_all(bytes)?;
            encoder.finish()?;
        } else {
            self.inner.write_all(bytes)?;
        }
        Ok(offset)
    }

    /// Flushes buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails to flush.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }

    /// Consumes the sink and returns the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }
}
