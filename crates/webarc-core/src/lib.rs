//! Reading and writing WARC and ARC web-archive files.
//!
//! `webarc-core` opens an archive from its file name alone: the suffix
//! selects the record engine (`.warc`, `.warc.gz`, `.arc`, `.arc.gz`) and a
//! trailing `.gz` selects storage as one gzip member per record.
//!
//! # Examples
//!
//! ```no_run
//! use webarc_core::RecordFormat;
//! use webarc_core::open;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut archive = open("crawl.warc.gz", "rb")?;
//! for entry in archive.browse() {
//!     let (record, offset) = entry?;
//!     println!("{offset} {:?}", record.url());
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod archive;
pub mod config;
pub mod error;
pub mod formats;
pub mod io;
pub mod mode;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export main API types
pub use api::copy_records;
pub use api::open;
pub use api::open_with_config;
pub use archive::ArchiveFile;
pub use archive::ArchiveOpener;
pub use archive::Record;
pub use config::ArcConfig;
pub use config::ArchiveConfig;
pub use error::ArchiveError;
pub use error::Result;
pub use formats::detect::FormatTag;
pub use formats::detect::detect_compression;
pub use formats::detect::detect_format;
pub use formats::traits::RecordFormat;
pub use mode::OpenMode;
