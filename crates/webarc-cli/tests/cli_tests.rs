//! Integration tests for webarc-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;
use webarc_core::Record;
use webarc_core::RecordFormat;
use webarc_core::formats::arc::ArcHeader;
use webarc_core::formats::arc::ArcRecord;
use webarc_core::formats::warc::WarcHeader;
use webarc_core::formats::warc::WarcRecord;

fn webarc_cmd() -> Command {
    cargo_bin_cmd!("webarc")
}

/// Writes a WARC file holding one `resource` record per `(uri, body)`.
fn write_warc(dir: &Path, name: &str, records: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(name);
    let mut archive = webarc_core::open(&path, "w").expect("failed to create archive");
    for (uri, body) in records {
        let mut header = WarcHeader::new();
        header.set("WARC-Type", "resource");
        header.set("WARC-Target-URI", *uri);
        let record = WarcRecord::new(header, body.as_bytes().to_vec());
        archive.write_record(&Record::Warc(record)).unwrap();
    }
    archive.close().unwrap();
    path
}

fn write_arc(dir: &Path, name: &str, records: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(name);
    let mut archive = webarc_core::open(&path, "w").expect("failed to create archive");
    for (url, body) in records {
        let record = ArcRecord::new(ArcHeader::new(*url, "text/plain"), body.as_bytes().to_vec());
        archive.write_record(&Record::Arc(record)).unwrap();
    }
    archive.close().unwrap();
    path
}

#[test]
fn test_version_flag() {
    webarc_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("webarc"));
}

#[test]
fn test_help_flag() {
    webarc_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Command-line utility"));
}

#[test]
fn test_detect_reports_formats() {
    webarc_cmd()
        .args(["detect", "crawl.warc.gz", "old.arc", "notes.txt", "a.WARC"])
        .assert()
        .success()
        .stdout(predicate::str::contains("crawl.warc.gz: warc (compression: gzip)"))
        .stdout(predicate::str::contains("old.arc: arc (compression: none)"))
        .stdout(predicate::str::contains("notes.txt: unsupported ('txt')"))
        .stdout(predicate::str::contains("a.WARC: unsupported ('WARC')"));
}

#[test]
fn test_detect_json_output() {
    let output = webarc_cmd()
        .args(["--json", "detect", "x.arc.gz", "noext"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["status"], "success");
    assert_eq!(json["operation"], "detect");
    assert_eq!(json["data"][0]["format"], "arc");
    assert_eq!(json["data"][0]["compressed"], true);
    assert_eq!(json["data"][1]["format"], "");
    assert_eq!(json["data"][1]["recognized"], false);
}

#[test]
fn test_list_warc() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let path = write_warc(
        temp.path(),
        "crawl.warc.gz",
        &[
            ("http://example.com/", "hello"),
            ("http://example.com/about", "about us"),
        ],
    );

    webarc_cmd()
        .arg("list")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("resource"))
        .stdout(predicate::str::contains("http://example.com/about"));
}

#[test]
fn test_list_long_shows_headers() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let records = [("http://example.com/", "hello")];
    let path = write_warc(temp.path(), "crawl.warc", &records);

    webarc_cmd()
        .args(["list", "--long"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Content-Length: 5"))
        .stdout(predicate::str::contains("Total: 1 records"));
}

#[test]
fn test_list_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let path = write_arc(
        temp.path(),
        "crawl.arc",
        &[
            ("http://example.com/", "one"),
            ("http://example.com/2", "two"),
        ],
    );

    let output = webarc_cmd()
        .args(["list", "--json"])
        .arg(&path)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["operation"], "list");
    assert_eq!(json["data"]["format"], "arc");
    assert_eq!(json["data"]["compressed"], false);
    let records = json["data"]["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["url"], "http://example.com/2");
    assert_eq!(records[1]["length"], 3);
}

#[test]
fn test_list_unsupported_format() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let path = temp.path().join("bundle.zip");
    std::fs::write(&path, b"PK").unwrap();

    webarc_cmd()
        .arg("list")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("don't know how to open 'zip' files"))
        .stderr(predicate::str::contains("HINT"));
}

#[test]
fn test_list_nonexistent_archive() {
    webarc_cmd()
        .args(["list", "nonexistent.warc.gz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn test_list_record_size_limit() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let records = [("http://example.com/", "0123456789")];
    let path = write_warc(temp.path(), "big.warc", &records);

    webarc_cmd()
        .args(["--max-record-size", "4", "list"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--max-record-size"));
}

#[test]
fn test_cat_writes_payload() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let path = write_warc(
        temp.path(),
        "crawl.warc.gz",
        &[
            ("http://example.com/", "first"),
            ("http://example.com/2", "second"),
        ],
    );

    webarc_cmd()
        .args(["cat", "--index", "1"])
        .arg(&path)
        .assert()
        .success()
        .stdout("second");
}

#[test]
fn test_cat_index_out_of_range() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let records = [("http://example.com/", "only")];
    let path = write_arc(temp.path(), "crawl.arc.gz", &records);

    webarc_cmd()
        .args(["cat", "-n", "5"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_cat_largest_index_is_out_of_range() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let records = [("http://example.com/", "only")];
    let path = write_warc(temp.path(), "crawl.warc", &records);

    webarc_cmd()
        .args(["cat", "--index"])
        .arg(usize::MAX.to_string())
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_copy_recompresses() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let input = write_warc(
        temp.path(),
        "in.warc",
        &[("http://example.com/", "a"), ("http://example.com/b", "b")],
    );
    let output = temp.path().join("out.warc.gz");

    webarc_cmd()
        .arg("copy")
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Records copied:   2"));

    let mut archive = webarc_core::open(&output, "r").unwrap();
    assert!(archive.is_compressed());
    assert_eq!(archive.records().count(), 2);
}

#[test]
fn test_copy_append() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let input = write_arc(temp.path(), "in.arc", &[("http://example.com/", "a")]);
    let output = write_arc(temp.path(), "out.arc", &[("http://example.com/x", "x")]);

    webarc_cmd()
        .args(["copy", "--append"])
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    let mut archive = webarc_core::open(&output, "r").unwrap();
    assert_eq!(archive.records().count(), 2);
}

#[test]
fn test_copy_refuses_existing_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let input = write_warc(temp.path(), "in.warc", &[("http://example.com/", "a")]);
    let output = write_warc(temp.path(), "out.warc", &[]);

    webarc_cmd()
        .arg("copy")
        .arg(&input)
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_copy_refuses_same_file() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let path = write_warc(
        temp.path(),
        "a.warc",
        &[("http://example.com/", "a"), ("http://example.com/b", "b")],
    );
    let before = std::fs::read(&path).unwrap();

    for flag in ["--force", "--append"] {
        webarc_cmd()
            .args(["copy", flag])
            .arg(&path)
            .arg(temp.path().join(".").join("a.warc"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("same file"))
            .stderr(predicate::str::contains("HINT"));
    }

    assert_eq!(std::fs::read(&path).unwrap(), before);
    let mut archive = webarc_core::open(&path, "r").unwrap();
    assert_eq!(archive.records().count(), 2);
}

#[test]
fn test_copy_rejects_cross_format() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let input = write_warc(temp.path(), "in.warc", &[("http://example.com/", "a")]);
    let output = temp.path().join("out.arc");

    webarc_cmd()
        .arg("copy")
        .arg(&input)
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("same format"));
    assert!(!output.exists());
}

#[test]
fn test_completion_bash() {
    webarc_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("webarc"));
}

#[test]
fn test_verbose_enables_debug_logging() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let path = write_warc(temp.path(), "crawl.warc", &[("http://example.com/", "a")]);

    webarc_cmd()
        .args(["--verbose", "list"])
        .arg(&path)
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("dispatching archive open"));
}
