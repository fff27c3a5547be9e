//! Error types for web-archive operations.

use thiserror::Error;

use crate::mode::OpenMode;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while opening, reading or writing an archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O operation failed.
    ///
    /// Errors raised while the record engine opens or streams the file are
    /// carried here unmodified.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file name does not end in a supported archive suffix.
    #[error("don't know how to open '{suffix}' files")]
    UnsupportedFormat {
        /// Text after the last dot of the file name (empty if there is none).
        suffix: String,
    },

    /// The access mode string is not one the record engine understands.
    #[error("unsupported open mode: '{mode}'")]
    UnsupportedMode {
        /// The rejected mode string.
        mode: String,
    },

    /// A record could not be framed or decoded.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// A record header line is malformed.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// A record declares a payload larger than the configured limit.
    #[error("record payload too large ({size} > {max} bytes)")]
    RecordTooLarge {
        /// Declared payload length.
        size: u64,
        /// Configured maximum.
        max: u64,
    },

    /// The operation needs a handle opened with a different mode.
    #[error("operation requires {expected} mode, archive was opened for {actual}")]
    ModeMismatch {
        /// Mode the operation requires.
        expected: OpenMode,
        /// Mode the handle was opened with.
        actual: OpenMode,
    },

    /// A record of one format was handed to an archive of another.
    #[error("cannot write {actual} record to {expected} archive")]
    FormatMismatch {
        /// Format of the archive.
        expected: &'static str,
        /// Format of the rejected record.
        actual: &'static str,
    },

    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ArchiveError {
    /// Returns `true` if this error was raised by format detection rather
    /// than by a record engine.
    ///
    /// # Examples
    ///
    /// ```
    /// use webarc_core::ArchiveError;
    ///
    /// let err = ArchiveError::UnsupportedFormat {
    ///     suffix: "zip".to_string(),
    /// };
    /// assert!(err.is_format_error());
    ///
    /// let err = ArchiveError::InvalidRecord("truncated".to_string());
    /// assert!(!err.is_format_error());
    /// ```
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        matches!(self, Self::UnsupportedFormat { .. })
    }

    /// Returns `true` if the archive content itself is malformed.
    #[must_use]
    pub const fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::InvalidRecord(_) | Self::InvalidHeader(_) | Self::RecordTooLarge { .. }
        )
    }

    /// Returns a context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use webarc_core::ArchiveError;
    ///
    /// let err = ArchiveError::InvalidHeader("Bad header line".to_string());
    /// assert_eq!(err.context(), Some("Bad header line"));
    ///
    /// let err = ArchiveError::UnsupportedFormat {
    ///     suffix: "txt".to_string(),
    /// };
    /// assert_eq!(err.context(), Some("txt"));
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidRecord(msg) | Self::InvalidHeader(msg) | Self::InvalidConfig(msg) => {
                Some(msg)
            }
            Self::UnsupportedFormat { suffix } => Some(suffix),
            Self::UnsupportedMode { mode } => Some(mode),
            _ => None,
        }
    }
}
