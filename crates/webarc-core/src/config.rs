//! Configuration for opening archives.

use crate::ArchiveError;
use crate::Result;
use crate::formats::arc::ArcVersion;

/// Settings shared by both record engines.
///
/// The defaults suit ordinary crawl output; pass by reference rather than
/// cloning when opening many files.
///
/// # Examples
///
/// ```
/// use webarc_core::ArchiveConfig;
///
/// let config = ArchiveConfig::default()
///     .with_compression_level(Some(9))
///     .with_max_record_size(64 * 1024 * 1024);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// Largest payload, in bytes, a reader will allocate for one record.
    pub max_record_size: u64,

    /// Gzip level (1-9) for compressed writers; `None` uses the flate2 default.
    pub compression_level: Option<u8>,

    /// Settings used when writing ARC files.
    pub arc: ArcConfig,
}

impl Default for ArchiveConfig {
    /// Default values:
    /// - `max_record_size`: 512 MB
    /// - `compression_level`: `None` (flate2 default, level 6)
    /// - `arc`: [`ArcConfig::default`]
    fn default() -> Self {
        Self {
            max_record_size: 512 * 1024 * 1024,
            compression_level: None,
            arc: ArcConfig::default(),
        }
    }
}

impl ArchiveConfig {
    /// Sets the maximum payload size accepted while reading.
    #[must_use]
    pub fn with_max_record_size(mut self, size: u64) -> Self {
        self.max_record_size = size;
        self
    }

    /// Sets the gzip level used by compressed writers.
    #[must_use]
    pub fn with_compression_level(mut self, level: Option<u8>) -> Self {
        self.compression_level = level;
        self
    }

    /// Sets the ARC writer settings.
    #[must_use]
    pub fn with_arc(mut self, arc: ArcConfig) -> Self {
        self.arc = arc;
        self
    }

    /// Checks that all values are in range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the compression level is outside 1-9 or
    /// the maximum record size is zero.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && !(1..=9).contains(&level)
        {
            return Err(ArchiveError::InvalidConfig(format!(
                "compression level must be between 1 and 9, got {level}"
            )));
        }

        if self.max_record_size == 0 {
            return Err(ArchiveError::InvalidConfig(
                "max_record_size must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns the flate2 compression setting for writers.
    #[must_use]
    pub fn gzip_level(&self) -> flate2::Compression {
        match self.compression_level {
            None => flate2::Compression::default(),
            Some(n) => flate2::Compression::new(u32::from(n.clamp(1, 9))),
        }
    }
}

/// Values written into the `filedesc://` header of new ARC files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcConfig {
    /// Header layout for records written to new files.
    pub version: ArcVersion,
    /// Organization named in the file header.
    pub organization: String,
    /// IP address recorded in the file header.
    pub ip_address: String,
}

impl Default for ArcConfig {
    fn default() -> Self {
        Self {
            version: ArcVersion::V2,
            organization: "unknown".to_string(),
            ip_address: "127.0.0.1".to_string(),
        }
    }
}
