//! Reader for files stored as concatenated gzip members.
//!
//! Web archives are usually compressed one record per gzip member so that a
//! reader can seek to a member boundary and decompress a single record. The
//! `SegmentReader` decodes members back to back, like flate2's
//! `MultiGzDecoder`, but keeps track of the compressed offset at which the
//! member currently being read starts.

use std::io::BufRead;
use std::io::Read;

use flate2::bufread::GzDecoder;

use super::counting::CountingReader;

/// Size of the decompressed-data buffer.
const BUFFER_SIZE: usize = 64 * 1024;

/// Decompresses a sequence of gzip members as one stream.
///
/// # Examples
///
/// ```
/// use flate2::Compression;
/// use flate2::write::GzEncoder;
/// use std::io::Read;
/// use std::io::Write;
/// use webarc_core::io::SegmentReader;
///
/// let mut data = Vec::new();
/// for part in [&b"first "[..], &b"second"[..]] {
///     let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
///     encoder.write_all(part)?;
///     data.extend(encoder.finish()?);
/// }
///
/// let mut reader = SegmentReader::new(&data[..]);
/// let mut out = String::new();
/// reader.read_to_string(&mut out)?;
/// assert_eq!(out, "first second");
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct SegmentReader<R> {
    /// Underlying reader positioned at a member boundary.
    idle: Option<CountingReader<R>>,
    /// Decoder for the member being read.
    member: Option<GzDecoder<CountingReader<R>>>,
    buf: Box<[u8]>,
    pos: usize,
    cap: usize,
    member_offset: u64,
}

impl<R: BufRead> SegmentReader<R> {
    /// Creates a reader over `inner`, which must start at a member boundary.
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            idle: Some(CountingReader::new(inner)),
            member: None,
            buf: vec![0u8; BUFFER_SIZE].into_boxed_slice(),
            pos: 0,
            cap: 0,
            member_offset: 0,
        }
    }

    /// Compressed offset of the member that produced the buffered data.
    #[must_use]
    pub fn member_offset(&self) -> u64 {
        self.member_offset
    }

    /// Finishes the current member and starts decoding the next one.
    ///
    /// Returns `false` once the underlying reader is exhausted.
    fn next_member(&mut self) -> std::io::Result<bool> {
        if let Some(member) = self.member.take() {
            self.idle = Some(member.into_inner());
        }

        let Some(mut inner) = self.idle.take() else {
            return Ok(false);
        };

        if inner.fill_buf()?.is_empty() {
            self.idle = Some(inner);
            return Ok(false);
        }

        self.member_offset = inner.position();
        tracing::trace!(offset = self.member_offset, "starting gzip member");
        self.member = Some(GzDecoder::new(inner));
        Ok(true)
    }
}

impl<R: BufRead> Read for SegmentReader<R> {
    fn read(&mut self, out: &mut [u8]) -> std::io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(out.len());
        out[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl<R: BufRead> BufRead for SegmentReader<R> {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        while self.pos >= self.cap {
            let n = match self.member.as_mut() {
                Some(member) => member.read(&mut self.buf)?,
                None => 0,
            };

            if n > 0 {
                self.pos = 0;
                self.cap = n;
            } else if !self.next_member()? {
                return Ok(&[]);
            }
        }
        Ok(&self.buf[self.pos..self.cap])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.cap);
    }
}
