//! Archive format and compression detection.
//!
//! Detection looks only at the file name. Matching is case-sensitive:
//! `crawl.WARC` is not recognized.

use std::path::Path;

/// Suffixes identifying WARC files.
const WARC_SUFFIXES: [&str; 2] = [".warc", ".warc.gz"];

/// Suffixes identifying ARC files.
const ARC_SUFFIXES: [&str; 2] = [".arc", ".arc.gz"];

/// Suffix identifying gzip member compression.
const GZIP_SUFFIX: &str = ".gz";

/// Container format derived from a file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormatTag {
    /// WARC (`.warc`, `.warc.gz`).
    Warc,
    /// Legacy ARC (`.arc`, `.arc.gz`).
    Arc,
    /// Anything else, carrying the text after the last dot.
    Unrecognized(String),
}

impl FormatTag {
    /// Returns the format name, or the raw suffix for unrecognized names.
    ///
    /// # Examples
    ///
    /// ```
    /// use webarc_core::formats::detect::FormatTag;
    ///
    /// assert_eq!(FormatTag::Warc.name(), "warc");
    /// assert_eq!(FormatTag::Unrecognized("zip".into()).name(), "zip");
    /// ```
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Warc => "warc",
            Self::Arc => "arc",
            Self::Unrecognized(suffix) => suffix,
        }
    }

    /// Returns `true` for `Warc` and `Arc`.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

/// Detects the container format from a file name.
///
/// The four known suffixes are checked in order; the first match wins,
/// regardless of any earlier dots in the name.
///
/// # Examples
///
/// ```
/// use webarc_core::formats::detect::FormatTag;
/// use webarc_core::formats::detect::detect_format;
///
/// assert_eq!(detect_format("crawl.tar.warc.gz"), FormatTag::Warc);
/// assert_eq!(detect_format("old.arc"), FormatTag::Arc);
/// assert_eq!(detect_format("notes.txt"), FormatTag::Unrecognized("txt".into()));
/// assert_eq!(detect_format("warc"), FormatTag::Unrecognized(String::new()));
/// ```
#[must_use]
pub fn detect_format(filename: &str) -> FormatTag {
    if WARC_SUFFIXES.iter().any(|s| filename.ends_with(s)) {
        FormatTag::Warc
    } else if ARC_SUFFIXES.iter().any(|s| filename.ends_with(s)) {
        FormatTag::Arc
    } else {
        let suffix = filename
            .rsplit_once('.')
            .map_or("", |(_, extension)| extension);
        FormatTag::Unrecognized(suffix.to_string())
    }
}

/// Detects whether the file is stored as gzip members.
///
/// Independent of [`detect_format`]: any name ending in `.gz` is compressed.
///
/// # Examples
///
/// ```
/// use webarc_core::formats::detect::detect_compression;
///
/// assert!(detect_compression("crawl.warc.gz"));
/// assert!(detect_compression("data.gz"));
/// assert!(!detect_compression("crawl.warc"));
/// ```
#[must_use]
pub fn detect_compression(filename: &str) -> bool {
    filename.ends_with(GZIP_SUFFIX)
}

/// Detects the format from the file name of `path`.
///
/// Dots in parent directories are ignored. Non-UTF-8 names are converted
/// lossily.
#[must_use]
pub fn detect_path_format(path: &Path) -> FormatTag {
    detect_format(&file_name(path))
}

/// Detects compression from the file name of `path`.
#[must_use]
pub fn detect_path_compression(path: &Path) -> bool {
    detect_compression(&file_name(path))
}

fn file_name(path: &Path) -> std::borrow::Cow<'_, str> {
    path.file_name()
        .map_or_else(|| path.to_string_lossy(), |name| name.to_string_lossy())
}
