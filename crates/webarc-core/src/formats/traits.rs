//! Common traits for record engines.

use crate::Result;

/// Trait implemented by every open archive handle.
///
/// Reading is forward-only: each call consumes the next record from the
/// underlying stream and there is no way to rewind.
pub trait RecordFormat {
    /// Record type produced and consumed by this handle.
    type Record;

    /// Returns the archive format name.
    fn format_name(&self) -> &'static str;

    /// Reads the next record together with the offset it was found at.
    ///
    /// The offset is the byte position of the record in an uncompressed
    /// file, or of its gzip member in a compressed one. Returns `None` at
    /// end of file.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is not readable or the record is
    /// malformed.
    fn next_record(&mut self) -> Result<Option<(Self::Record, u64)>>;

    /// Appends a record and returns the offset it was written at.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is not writable or writing fails.
    fn write_record(&mut self, record: &Self::Record) -> Result<u64>;

    /// Returns the offset of the next record to be read or written.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying stream cannot be queried.
    fn tell(&mut self) -> Result<u64>;

    /// Reads the next record.
    ///
    /// # Errors
    ///
    /// See [`RecordFormat::next_record`].
    fn read_record(&mut self) -> Result<Option<Self::Record>> {
        Ok(self.next_record()?.map(|(record, _)| record))
    }

    /// Returns a lazy iterator over the remaining records.
    fn records(&mut self) -> Records<'_, Self>
    where
        Self: Sized,
    {
        Records {
            handle: self,
            done: false,
        }
    }

    /// Returns a lazy iterator over the remaining records and their offsets.
    fn browse(&mut self) -> Browse<'_, Self>
    where
        Self: Sized,
    {
        Browse {
            handle: self,
            done: false,
        }
    }
}

/// Iterator over records, stopping after the first error.
pub struct Records<'a, F> {
    handle: &'a mut F,
    done: bool,
}

impl<F: RecordFormat> Iterator for Records<'_, F> {
    type Item = Result<F::Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.handle.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Iterator over `(record, offset)` pairs, stopping after the first error.
pub struct Browse<'a, F> {
    handle: &'a mut F,
    done: bool,
}

impl<F: RecordFormat> Iterator for Browse<'_, F> {
    type Item = Result<(F::Record, u64)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.handle.next_record() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
