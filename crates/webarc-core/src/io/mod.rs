//! I/O adapters shared by the record engines.

pub mod counting;
pub mod segment;
pub mod stream;

// Re-export main types for convenience
pub use counting::CountingReader;
pub use counting::CountingWriter;
pub use segment::SegmentReader;
pub use stream::RecordSink;
pub use stream::RecordSource;
