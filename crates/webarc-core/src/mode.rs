//! Access intent for opening an archive.

use std::fmt;
use std::str::FromStr;

use crate::ArchiveError;

/// How an archive file is opened.
///
/// Parsed from the conventional `open()` mode strings; the binary `b`
/// flag is accepted and ignored since archives are always binary.
///
/// # Examples
///
/// ```
/// use webarc_core::OpenMode;
///
/// assert_eq!("rb".parse::<OpenMode>().unwrap(), OpenMode::Read);
/// assert_eq!("w".parse::<OpenMode>().unwrap(), OpenMode::Write);
/// assert_eq!("ab".parse::<OpenMode>().unwrap(), OpenMode::Append);
/// assert!("x".parse::<OpenMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OpenMode {
    /// Iterate existing records.
    #[default]
    Read,
    /// Create or truncate the file and write records.
    Write,
    /// Write records after the existing content.
    Append,
}

impl OpenMode {
    /// Returns `true` for modes that write records.
    #[must_use]
    pub const fn is_writable(self) -> bool {
        matches!(self, Self::Write | Self::Append)
    }

    /// Returns the mode name used in messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Append => "append",
        }
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OpenMode {
    type Err = ArchiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "r" | "rb" | "read" => Ok(Self::Read),
            "w" | "wb" | "write" => Ok(Self::Write),
            "a" | "ab" | "append" => Ok(Self::Append),
            _ => Err(ArchiveError::UnsupportedMode {
                mode: s.to_string(),
            }),
        }
    }
}
