//! Integration tests for failure propagation: no partial output is ever written

use super::test_utils::{read_json, source_and_dest, write_tree, UnreadableFile};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use tree_json::config::ConvertConfig;
use tree_json::{Converter, ConvertError, IoErrorKind, ResolveWith};

/// Test that one unreadable file fails the conversion and creates no output
#[tokio::test]
async fn test_unreadable_file_fails_without_output() {
    let temp_dir = TempDir::new().unwrap();
    let (source, dest) = source_and_dest(temp_dir.path(), "broken");
    write_tree(
        &source,
        &[
            ("fine.txt", "ok"),
            ("nested/also_fine.txt", "ok"),
            ("nested/deeper/secret.txt", "unreadable"),
        ],
    );

    let converter = Converter::with_source(
        UnreadableFile {
            file_name: "secret.txt",
        },
        &ConvertConfig::default(),
    );
    let err = converter.convert(&source, &dest).await.unwrap_err();

    assert_eq!(err.io_kind(), Some(IoErrorKind::ReadFailure));
    assert!(!dest.join("broken.json").exists());
    assert_eq!(fs::read_dir(&dest).unwrap().count(), 0);
}

/// Test that a failed conversion leaves a previous output untouched
#[tokio::test]
async fn test_failure_leaves_existing_output_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let (source, dest) = source_and_dest(temp_dir.path(), "site");
    write_tree(&source, &[("index.html", "<html>"), ("bad.txt", "x")]);
    let previous = "{\"index\":\"old\"}";
    fs::write(dest.join("site.json"), previous).unwrap();

    let converter = Converter::with_source(
        UnreadableFile {
            file_name: "bad.txt",
        },
        &ConvertConfig::default(),
    );
    assert!(converter.convert(&source, &dest).await.is_err());

    assert_eq!(fs::read_to_string(dest.join("site.json")).unwrap(), previous);
}

/// Test that a dangling symlink fails classification and the conversion
#[cfg(unix)]
#[tokio::test]
async fn test_dangling_symlink_fails_conversion() {
    let temp_dir = TempDir::new().unwrap();
    let (source, dest) = source_and_dest(temp_dir.path(), "links");
    write_tree(&source, &[("real.txt", "real")]);
    std::os::unix::fs::symlink(source.join("missing.txt"), source.join("dangling.txt")).unwrap();

    let err = Converter::new(&ConvertConfig::default())
        .convert(&source, &dest)
        .await
        .unwrap_err();

    assert_eq!(err.io_kind(), Some(IoErrorKind::NotFound));
    assert!(!dest.join("links.json").exists());
}

/// Test that a file name that is not valid UTF-8 still converts, under a lossy key
#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_non_utf8_file_name_converts() {
    use std::os::unix::ffi::OsStrExt;

    let temp_dir = TempDir::new().unwrap();
    let (source, dest) = source_and_dest(temp_dir.path(), "site");
    write_tree(&source, &[("ok.txt", "fine")]);
    fs::write(source.join(std::ffi::OsStr::from_bytes(b"caf\xe9.txt")), "latin-1").unwrap();

    let written = Converter::new(&ConvertConfig::default())
        .convert(&source, &dest)
        .await
        .unwrap();

    assert_eq!(
        read_json(&written),
        serde_json::json!({ "ok": "fine", "caf\u{FFFD}": "latin-1" })
    );
}

/// Test that a missing source tree fails before anything is written
#[tokio::test]
async fn test_missing_source_fails() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("out");
    fs::create_dir(&dest).unwrap();

    let err = Converter::new(&ConvertConfig::default())
        .convert(&temp_dir.path().join("absent"), &dest)
        .await
        .unwrap_err();

    assert_eq!(err.io_kind(), Some(IoErrorKind::NotFound));
    assert_eq!(fs::read_dir(&dest).unwrap().count(), 0);
}

/// Test that a failing host resolver fails the conversion before any traversal
#[tokio::test]
async fn test_host_resolution_failure_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("out");
    fs::create_dir(&dest).unwrap();

    let handle = ResolveWith::new("artifacts", || async {
        Err::<PathBuf, _>("build step produced no output directory")
    });
    let err = Converter::new(&ConvertConfig::default())
        .convert(&handle, &dest)
        .await
        .unwrap_err();

    assert!(matches!(err, ConvertError::Resolve(_)));
    assert_eq!(fs::read_dir(&dest).unwrap().count(), 0);
}

/// Test that a missing destination directory is reported as a write-side failure
#[tokio::test]
async fn test_missing_destination_fails() {
    let temp_dir = TempDir::new().unwrap();
    let (source, _) = source_and_dest(temp_dir.path(), "site");
    write_tree(&source, &[("a.txt", "x")]);

    let err = Converter::new(&ConvertConfig::default())
        .convert(&source, &temp_dir.path().join("no-such-dir"))
        .await
        .unwrap_err();
    assert_eq!(err.io_kind(), Some(IoErrorKind::NotFound));
}

/// Test that a cancelled conversion writes nothing
#[tokio::test]
async fn test_cancelled_conversion_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let (source, dest) = source_and_dest(temp_dir.path(), "site");
    write_tree(&source, &[("a.txt", "x"), ("b/c.txt", "y")]);

    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = Converter::new(&ConvertConfig::default())
        .convert_with_cancel(&source, &dest, &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, ConvertError::Cancelled));
    assert!(!dest.join("site.json").exists());
}
