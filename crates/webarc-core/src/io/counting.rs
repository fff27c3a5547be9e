//! Byte-counting stream wrappers.
//!
//! `CountingWriter` tracks how many bytes have been written to an archive
//! so writers can report record offsets; `CountingReader` does the same for
//! bytes consumed from the underlying (possibly compressed) file.

use std::io::BufRead;
use std::io::Read;
use std::io::Write;

/// Wrapper writer that tracks total bytes written.
///
/// The counter only increments on successful writes. If a write operation
/// fails partway through, only the successfully written bytes are counted.
///
/// # Examples
///
/// ```
/// use webarc_core::io::CountingWriter;
/// use std::io::Write;
///
/// let mut buffer = Vec::new();
/// let mut writer = CountingWriter::new(&mut buffer);
///
/// writer.write_all(b"WARC/1.0\r\n")?;
/// assert_eq!(writer.total_bytes(), 10);
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct CountingWriter<W> {
    inner: W,
    bytes_written: u64,
}

impl<W> CountingWriter<W> {
    /// Creates a new counting writer.
    #[must_use]
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bytes_written: 0,
        }
    }

    /// Returns the total number of bytes successfully written.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.bytes_written
    }

    /// Consumes the counting writer and returns the inner writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Returns a reference to the inner writer.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let bytes = self.inner.write(buf)?;
        self.bytes_written += bytes as u64;
        Ok(bytes)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.inner.write_all(buf)?;
        self.bytes_written += buf.len() as u64;
        Ok(())
    }
}

/// Wrapper reader that tracks the position of the next unread byte.
///
/// Both `read` and `consume` advance the position, so the count stays exact
/// when the reader is driven through the `BufRead` interface (as flate2's
/// `bufread` decoders do).
///
/// # Examples
///
/// ```
/// use webarc_core::io::CountingReader;
/// use std::io::BufRead;
///
/// let mut reader = CountingReader::new(&b"line one\nline two\n"[..]);
/// let mut line = String::new();
/// reader.read_line(&mut line)?;
/// assert_eq!(reader.position(), 9);
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct CountingReader<R> {
    inner: R,
    position: u64,
}

impl<R> CountingReader<R> {
    /// Creates a new counting reader starting at position zero.
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self::with_position(inner, 0)
    }

    /// Creates a counting reader whose first byte is at `position`.
    #[must_use]
    pub fn with_position(inner: R, position: u64) -> Self {
        Self { inner, position }
    }

    /// Returns the offset of the next unread byte.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Consumes the counting reader and returns the inner reader.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let bytes = self.inner.read(buf)?;
        self.position += bytes as u64;
        Ok(bytes)
    }
}

impl<R: BufRead> BufRead for CountingReader<R> {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt);
        self.position += amt as u64;
    }
}
