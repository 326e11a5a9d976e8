use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

#[allow(deprecated)]
fn get_widgetshot_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("widgetshot")
}

#[test]
fn test_help_lists_presets_and_flags() {
    let mut cmd = Command::new(get_widgetshot_bin());
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("headless Chrome"))
        .stdout(predicate::str::contains("widget"))
        .stdout(predicate::str::contains("windguru"))
        .stdout(predicate::str::contains("windguru-grid"))
        .stdout(predicate::str::contains("--chrome-path"))
        .stdout(predicate::str::contains("WIDGETSHOT_CHROME"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn test_version_flag() {
    let mut cmd = Command::new(get_widgetshot_bin());
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_chrome_fails_without_writing_output() {
    let temp_dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::new(get_widgetshot_bin());
    cmd.current_dir(temp_dir.path())
        .env_remove("WIDGETSHOT_CHROME")
        .arg("--chrome-path")
        .arg("/nonexistent/chrome");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Chrome not found"));

    assert!(!temp_dir.path().join("windguru-widget.png").exists());
}

#[test]
fn test_chrome_path_from_environment() {
    let temp_dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::new(get_widgetshot_bin());
    cmd.current_dir(temp_dir.path())
        .env("WIDGETSHOT_CHROME", "/nonexistent/from-env/chrome")
        .arg("windguru");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/from-env/chrome"));

    assert!(!temp_dir.path().join("docs").exists());
}

#[test]
fn test_unknown_preset_is_rejected() {
    let mut cmd = Command::new(get_widgetshot_bin());
    cmd.arg("forecast");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'forecast'"));
}

#[test]
fn test_failure_is_reported_on_one_line() {
    let temp_dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::new(get_widgetshot_bin());
    cmd.current_dir(temp_dir.path())
        .env_remove("WIDGETSHOT_CHROME")
        .arg("--chrome-path")
        .arg("/nonexistent/chrome");

    let output = cmd.assert().code(1).get_output().stderr.clone();
    let stderr = String::from_utf8(output).unwrap();
    let error_lines: Vec<_> = stderr.lines().filter(|l| l.contains("Error")).collect();

    assert_eq!(
        error_lines,
        vec!["Error: Cannot start a browser: Browser error: Chrome not found at: /nonexistent/chrome"]
    );
    assert!(!stderr.contains("Caused by"));
}
