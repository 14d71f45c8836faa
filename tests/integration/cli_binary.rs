//! Integration tests for the tree-json binary

use super::test_utils::{env_lock, read_json, source_and_dest, write_tree};
use serde_json::json;
use std::process::Command;
use tempfile::TempDir;

/// Children inherit the environment, so spawn only under the environment lock
fn tree_json() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_tree-json"));
    command.env("TREE_JSON_LOG", "off");
    command
}

/// Test that the binary writes the document and prints its path
#[test]
fn test_binary_converts_tree() {
    let temp_dir = TempDir::new().unwrap();
    let (source, dest) = source_and_dest(temp_dir.path(), "docs");
    write_tree(&source, &[("intro.md", "hello"), ("guide/setup.md", "steps")]);

    let env = env_lock();
    let output = tree_json()
        .current_dir(temp_dir.path())
        .arg(&source)
        .arg(&dest)
        .output()
        .unwrap();
    drop(env);

    assert!(
        output.status.success(),
        "tree-json should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    let written = dest.join("docs.json");
    assert!(String::from_utf8_lossy(&output.stdout).contains("docs.json"));
    assert_eq!(
        read_json(&written),
        json!({ "intro": "hello", "guide": { "setup": "steps" } })
    );
}

/// Test that a collision under --on-collision reject exits non-zero without output
#[test]
fn test_binary_reject_collision_fails() {
    let temp_dir = TempDir::new().unwrap();
    let (source, dest) = source_and_dest(temp_dir.path(), "clash");
    write_tree(&source, &[("a.txt", "1"), ("a.md", "2")]);

    let env = env_lock();
    let output = tree_json()
        .current_dir(temp_dir.path())
        .arg(&source)
        .arg(&dest)
        .args(["--on-collision", "reject"])
        .output()
        .unwrap();
    drop(env);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("'a'"));
    assert!(!dest.join("clash.json").exists());
}

/// Test that a missing source exits non-zero
#[test]
fn test_binary_missing_source_fails() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("out");
    std::fs::create_dir(&dest).unwrap();

    let env = env_lock();
    let output = tree_json()
        .current_dir(temp_dir.path())
        .arg(temp_dir.path().join("absent"))
        .arg(&dest)
        .output()
        .unwrap();
    drop(env);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
}

/// Test that --log-output file writes structured logs to the given file
#[test]
fn test_binary_logs_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let (source, dest) = source_and_dest(temp_dir.path(), "logged");
    write_tree(&source, &[("a.txt", "x")]);
    let log_file = temp_dir.path().join("logs").join("tree-json.log");

    let env = env_lock();
    let output = Command::new(env!("CARGO_BIN_EXE_tree-json"))
        .env_remove("TREE_JSON_LOG")
        .env_remove("TREE_JSON_LOG_OUTPUT")
        .current_dir(temp_dir.path())
        .arg(&source)
        .arg(&dest)
        .args(["--log-level", "info", "--log-output", "file", "--log-file"])
        .arg(&log_file)
        .output()
        .unwrap();
    drop(env);

    assert!(
        output.status.success(),
        "tree-json should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    let logs = std::fs::read_to_string(&log_file).unwrap();
    assert!(logs.contains("Conversion completed"));
}
