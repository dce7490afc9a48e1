//! Binary-level tests: usage errors, fatal config/history errors, summary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_config(dir: &Path, calculate_md5_hash: bool) -> std::path::PathBuf {
    let root = dir.canonicalize().unwrap();
    fs::create_dir_all(root.join("in")).unwrap();
    let config = serde_json::json!({
        "file_extensions": ["txt"],
        "scan_paths": [root.join("in")],
        "output_dir": root.join("out"),
        "history_store_path": root.join("hist.json"),
        "calculate_md5_hash": calculate_md5_hash,
    });
    let path = root.join("config.json");
    fs::write(&path, config.to_string()).unwrap();
    path
}

fn papercopy() -> Command {
    let mut cmd = Command::cargo_bin("papercopy").expect("binary should build");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_missing_config_argument_is_usage_error() {
    papercopy()
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONFIG"));
}

#[test]
fn test_nonexistent_config_file_fails() {
    papercopy()
        .arg("/nonexistent/config.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("valid path to a config file"));
}

#[test]
fn test_malformed_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    papercopy()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_corrupt_history_fails_without_copying() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path(), true);
    let root = temp_dir.path().canonicalize().unwrap();
    fs::write(root.join("in/a.txt"), b"hello").unwrap();
    fs::write(root.join("hist.json"), b"[{\"FilePath\":").unwrap();

    papercopy()
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is corrupt"));

    assert!(!root.join("out").exists());
}

#[test]
fn test_run_prints_summary_and_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path(), true);
    let root = temp_dir.path().canonicalize().unwrap();
    fs::write(root.join("in/a.txt"), b"hello").unwrap();

    papercopy()
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Files Copied: 1"))
        .stdout(predicate::str::contains("5d41402abc4b2a76b9719d911017c592"));

    papercopy()
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Files Copied: 0"))
        .stdout(predicate::str::contains("Files Unchanged: 1"));

    assert_eq!(fs::read(root.join("out/a.txt")).unwrap(), b"hello");
}

#[test]
fn test_dry_run_flag() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path(), false);
    let root = temp_dir.path().canonicalize().unwrap();
    fs::write(root.join("in/a.txt"), b"hello").unwrap();

    papercopy()
        .arg(&config)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Files To Copy: 1"));

    assert!(!root.join("out").exists());
    assert!(!root.join("hist.json").exists());
}
