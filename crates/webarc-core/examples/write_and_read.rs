//! Example: Writing and reading archives with webarc-core
//!
//! Run with: `cargo run --example write_and_read`

use webarc_core::ArchiveOpener;
use webarc_core::RecordFormat;
use webarc_core::formats::arc::ArcHeader;
use webarc_core::formats::arc::ArcRecord;
use webarc_core::formats::warc::WarcHeader;
use webarc_core::formats::warc::WarcRecord;
use webarc_core::open;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Example 1: The file name picks WARC with per-record gzip members
    println!("Example 1: WARC");
    let mut archive = open("example.warc.gz", "wb")?;
    for page in ["index", "about"] {
        let mut header = WarcHeader::new();
        header.set("WARC-Type", "resource");
        header.set("WARC-Target-URI", format!("http://example.com/{page}"));
        let record = WarcRecord::new(header, format!("<html>{page}</html>").into_bytes());
        let offset = archive.write_record(&record.into())?;
        println!("  Wrote {page} at offset {offset}");
    }
    archive.close()?;

    let mut archive = open("example.warc.gz", "rb")?;
    for entry in archive.browse() {
        let (record, offset) = entry?;
        println!(
            "  {offset:>6}  {}  {} bytes",
            record.url().unwrap_or("-"),
            record.payload().len()
        );
    }
    std::fs::remove_file("example.warc.gz")?;

    // Example 2: Builder with a plain ARC file
    println!("\nExample 2: ARC");
    let mut archive = ArchiveOpener::new().path("example.arc").mode("w").open()?;
    let header = ArcHeader::new("http://example.com/", "text/plain");
    archive.write_record(&ArcRecord::new(header, b"hello".to_vec()).into())?;
    archive.close()?;

    print!("{}", std::fs::read_to_string("example.arc")?);
    std::fs::remove_file("example.arc")?;

    // Example 3: Unknown suffixes are rejected before any file is touched
    println!("\nExample 3: Unsupported format");
    if let Err(err) = open("example.tar.gz", "r") {
        println!("  {err}");
    }

    println!("\nExamples completed successfully!");
    Ok(())
}
