use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

fn file_logger() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("file_logger"))
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_missing_message_argument() {
    file_logger()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_writes_to_named_file() {
    let dir = tempfile::tempdir().unwrap();

    file_logger()
        .args(["--file", "app.log", "--level", "error", "boom"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("app.log"));

    let contents = fs::read_to_string(dir.path().join("app.log")).unwrap();
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.ends_with("--- ERROR: \"boom\"\n"));
}

#[test]
fn test_daily_file_name() {
    let dir = tempfile::tempdir().unwrap();

    let output = file_logger()
        .args(["--prefix", "access_", "--extension", "log", "hello"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let output_str = String::from_utf8(output).unwrap();
    let printed = std::path::PathBuf::from(output_str.trim_end());
    assert_eq!(printed.parent(), Some(dir.path()));

    // access_YYYY-MM-DD.log
    let name = printed.file_name().unwrap().to_str().unwrap();
    let date = name
        .strip_prefix("access_")
        .and_then(|rest| rest.strip_suffix(".log"))
        .unwrap();
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();

    let contents = fs::read_to_string(&printed).unwrap();
    assert!(contents.ends_with(" --- \"hello\"\n"));
}

#[test]
fn test_disabled_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();

    file_logger()
        .args(["--disabled", "--file", "app.log", "ignored"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("logger disabled"));

    assert!(!dir.path().join("app.log").exists());
}

// ============================================================================
// Line Content Tests
// ============================================================================

#[test]
fn test_initiator_and_addresses() {
    let dir = tempfile::tempdir().unwrap();

    file_logger()
        .args([
            "--file",
            "app.log",
            "--initiator",
            "auth",
            "--server-addr",
            "10.0.0.1",
            "--remote-addr",
            "172.16.0.9",
            "--level",
            "visit",
            "/login",
        ])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success();

    let contents = fs::read_to_string(dir.path().join("app.log")).unwrap();
    assert!(contents.contains(" (auth)  [10.0.0.1|172.16.0.9]  --- VISIT: \"/login\""));
}

#[test]
fn test_json_message_is_dumped() {
    let dir = tempfile::tempdir().unwrap();

    file_logger()
        .args(["--json", "--file", "app.log", r#"{"id": 7, "tags": ["a", "b"], "ok": true}"#])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success();

    let contents = fs::read_to_string(dir.path().join("app.log")).unwrap();
    assert!(contents.ends_with(" --- {\"id\": 7, \"ok\": true, \"tags\": [\"a\", \"b\"]}\n"));
}

#[test]
fn test_invalid_json_message() {
    let dir = tempfile::tempdir().unwrap();

    file_logger()
        .args(["--json", "--file", "app.log", "{oops"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: cannot render message"));
}

// ============================================================================
// File Selection Tests
// ============================================================================

#[test]
fn test_appends_by_default_and_clears_on_request() {
    let dir = tempfile::tempdir().unwrap();

    for message in ["one", "two"] {
        file_logger()
            .args(["--file", "app.log", message])
            .arg("--dir")
            .arg(dir.path())
            .assert()
            .success();
    }
    let contents = fs::read_to_string(dir.path().join("app.log")).unwrap();
    assert_eq!(contents.lines().count(), 2);

    file_logger()
        .args(["--clear", "--file", "app.log", "three"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success();
    let contents = fs::read_to_string(dir.path().join("app.log")).unwrap();
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.ends_with("\"three\"\n"));
}

#[test]
fn test_most_recent_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("log_2023-12-31.txt"), "").unwrap();
    fs::write(dir.path().join("log_2024-01-02.txt"), "").unwrap();

    file_logger()
        .args(["--no-daily", "latest"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("log_2024-01-02.txt"));

    assert_eq!(fs::read_to_string(dir.path().join("log_2023-12-31.txt")).unwrap(), "");
}

#[test]
fn test_most_recent_file_in_empty_directory() {
    let dir = tempfile::tempdir().unwrap();

    file_logger()
        .args(["--no-daily", "nowhere"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: no log file found"));
}

#[test]
fn test_missing_directory() {
    let dir = tempfile::tempdir().unwrap();

    file_logger()
        .args(["--file", "app.log", "lost"])
        .arg("--dir")
        .arg(dir.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: cannot create file"));
}
