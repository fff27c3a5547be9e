//! Format detection and record engines.

pub(crate) mod common;
pub mod arc;
pub mod detect;
pub mod traits;
pub mod warc;

// Re-export main types for convenience
pub use arc::ArcFile;
pub use arc::ArcRecord;
pub use detect::FormatTag;
pub use traits::RecordFormat;
pub use warc::WarcFile;
pub use warc::WarcRecord;
