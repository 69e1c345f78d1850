use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to write a fixture file into a fresh temp dir
fn write_fixture(name: &str, bytes: &[u8]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    (temp_dir, path)
}

#[test]
fn test_headless_report_for_utf8_file() {
    let (_dir, path) = write_fixture("sample.txt", "中文abc".as_bytes());

    cargo_bin_cmd!()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Encoding: utf-8"))
        .stdout(predicate::str::contains("Size:     9 bytes"))
        .stdout(predicate::str::contains("- Total:         5"))
        .stdout(predicate::str::contains("- Chinese:       2"))
        .stdout(predicate::str::contains("- Chinese share: 40.00%"));
}

#[test]
fn test_brief_prints_summary_only() {
    let (_dir, path) = write_fixture("sample.txt", "中文abc".as_bytes());

    cargo_bin_cmd!()
        .arg(&path)
        .arg("--brief")
        .assert()
        .success()
        .stdout("Counted - Chinese: 2 / Total: 5\n");
}

#[test]
fn test_gbk_file_is_detected() {
    let (bytes, _, _) = encoding_rs::GBK.encode("统计完成，共四字");
    let (_dir, path) = write_fixture("gbk.txt", &bytes);

    cargo_bin_cmd!()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Encoding: gbk"))
        .stdout(predicate::str::contains("- Chinese share: 100.00%"));
}

#[test]
fn test_utf16_file_is_detected() {
    let mut bytes = vec![0xFF, 0xFE];
    bytes.extend("中文abc".encode_utf16().flat_map(u16::to_le_bytes));
    let (_dir, path) = write_fixture("utf16.txt", &bytes);

    cargo_bin_cmd!()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Encoding: utf-16"))
        .stdout(predicate::str::contains("Size:     12 bytes"))
        .stdout(predicate::str::contains("- Total:         5"));
}

#[test]
fn test_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!()
        .arg(temp_dir.path().join("nope.txt"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn test_undecodable_file_fails_without_stats() {
    let (_dir, path) = write_fixture("garbage.txt", &[0xFF, 0xFF, 0xFF]);

    cargo_bin_cmd!()
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Total").not())
        .stderr(predicate::str::contains("unknown encoding"));
}

#[test]
fn test_directory_without_matching_files_fails() {
    let (dir, _path) = write_fixture("notes.md", b"hello");

    cargo_bin_cmd!()
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no .txt files found"));
}

#[test]
fn test_all_files_conflicts_with_types() {
    cargo_bin_cmd!()
        .args(["--all-files", "--types", "md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
