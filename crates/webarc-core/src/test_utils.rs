//! Test utilities for building sample archives in memory.
//!
//! # Panics
//!
//! Functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::formats::arc::ArcHeader;
use crate::formats::arc::ArcRecord;
use crate::formats::warc::WarcHeader;
use crate::formats::warc::WarcRecord;

/// Compresses `data` as a single gzip member.
#[must_use]
pub fn gzip_member(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Builds a `response` record for `uri` with default headers.
#[must_use]
pub fn warc_record(uri: &str, payload: &[u8]) -> WarcRecord {
    let mut header = WarcHeader::new();
    header.set("WARC-Type", "response");
    header.set("WARC-Target-URI", uri);
    WarcRecord::new(header, payload.to_vec())
}

/// A two-record WARC file: `warcinfo` followed by a `response` for
/// `http://example.com/` with payload `<html>example</html>`.
#[must_use]
pub fn sample_warc_bytes() -> Vec<u8> {
    let info = b"software: webarc\r\nformat: WARC File Format 1.0\r\n";
    let mut data = Vec::new();
    write!(
        data,
        "WARC/1.0\r\n\
         WARC-Type: warcinfo\r\n\
         WARC-Record-ID: <urn:uuid:00000000-0000-4000-8000-000000000001>\r\n\
         WARC-Date: 2012-01-01T00:00:00Z\r\n\
         Content-Type: application/warc-fields\r\n\
         Content-Length: {}\r\n\r\n",
        info.len()
    )
    .unwrap();
    data.extend_from_slice(info);
    data.extend_from_slice(b"\r\n\r\n");

    let body = b"<html>example</html>";
    write!(
        data,
        "WARC/1.0\r\n\
         WARC-Type: response\r\n\
         WARC-Record-ID: <urn:uuid:00000000-0000-4000-8000-000000000002>\r\n\
         WARC-Date: 2012-01-01T00:00:01Z\r\n\
         WARC-Target-URI: http://example.com/\r\n\
         Content-Type: text/html\r\n\
         Content-Length: {}\r\n\r\n",
        body.len()
    )
    .unwrap();
    data.extend_from_slice(body);
    data.extend_from_slice(b"\r\n\r\n");
    data
}

/// Builds an ARC record for `url` with a `text/html` payload.
#[must_use]
pub fn arc_record(url: &str, payload: &[u8]) -> ArcRecord {
    let mut header = ArcHeader::new(url, "text/html");
    header.ip_address = "192.0.2.1".to_string();
    header.date = "20120101000000".to_string();
    ArcRecord::new(header, payload.to_vec())
}

/// A version 1 ARC file from "Example Archive" holding two records: an
/// HTML page for `http://example.com/` and a `text/plain` robots file.
#[must_use]
pub fn sample_arc_v1_bytes() -> Vec<u8> {
    let desc = b"1 0 Example Archive\nURL IP-address Archive-date Content-type Archive-length\n";
    let page = b"<html>example</html>";
    let robots = b"User-agent: *\n";

    let mut data = Vec::new();
    writeln!(
        data,
        "filedesc://sample.arc 0.0.0.0 20120101000000 text/plain {}",
        desc.len()
    )
    .unwrap();
    data.extend_from_slice(desc);
    data.push(b'\n');

    writeln!(
        data,
        "http://example.com/ 192.0.2.1 20120101000001 text/html {}",
        page.len()
    )
    .unwrap();
    data.extend_from_slice(page);
    data.push(b'\n');

    writeln!(
        data,
        "http://example.com/robots.txt 192.0.2.1 20120101000002 text/plain {}",
        robots.len()
    )
    .unwrap();
    data.extend_from_slice(robots);
    data.push(b'\n');
    data
}
