//! End-to-end tests for the pkgpulse binary
//!
//! These run the compiled binary against temp directories and avoid
//! all network traffic: either there is nothing to resolve, or every
//! package is skipped, and the self-update check is disabled.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn pkgpulse() -> Command {
    Command::cargo_bin("pkgpulse").expect("binary builds")
}

#[test]
fn test_help_output() {
    pkgpulse()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Check npm dependencies"))
        .stdout(predicate::str::contains("--skip"))
        .stdout(predicate::str::contains("--no-prompt"));
}

#[test]
fn test_version_output() {
    pkgpulse()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pkgpulse"));
}

#[test]
fn test_missing_manifest_is_fatal() {
    let dir = TempDir::new().unwrap();

    pkgpulse()
        .arg(dir.path())
        .arg("--no-self-check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("package.json not found"));
}

#[test]
fn test_malformed_manifest_is_fatal() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), "{not json").unwrap();

    pkgpulse()
        .arg(dir.path())
        .arg("--no-self-check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON"));
}

#[test]
fn test_empty_manifest_succeeds_without_network() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"name": "sample", "version": "1.0.0"}"#,
    )
    .unwrap();

    pkgpulse()
        .arg(dir.path())
        .arg("--no-self-check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary (0 packages)"));
}

#[test]
fn test_all_skipped_succeeds_without_network() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{
            "name": "sample",
            "dependencies": {"lodash": "^4.17.0", "chalk": "5.0.0"}
        }"#,
    )
    .unwrap();

    pkgpulse()
        .arg(dir.path())
        .args(["--skip", "*", "--no-self-check", "--no-prompt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SKIPPED"))
        .stdout(predicate::str::contains("Summary (2 packages)"))
        .stdout(predicate::str::contains("Skipped: 2"));
}

#[test]
fn test_config_file_skip_rules_applied() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"dependencies": {"lodash": "^4.17.0"}}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("pkgpulse.config.json"),
        r#"{"skip": ["*"]}"#,
    )
    .unwrap();

    pkgpulse()
        .arg(dir.path())
        .args(["--no-self-check", "--no-prompt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped: 1"));
}

#[test]
fn test_broken_config_file_warns_but_runs() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"name": "sample"}"#,
    )
    .unwrap();
    fs::write(dir.path().join(".pkgpulserc"), "{broken").unwrap();

    pkgpulse()
        .arg(dir.path())
        .arg("--no-self-check")
        .assert()
        .success()
        .stdout(predicate::str::contains("could not parse"));
}

#[test]
fn test_quiet_mode_prints_summary_only() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"dependencies": {"lodash": "^4.17.0"}}"#,
    )
    .unwrap();

    pkgpulse()
        .arg(dir.path())
        .args(["--skip", "*", "--no-self-check", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary (1 packages)"))
        .stdout(predicate::str::contains("SKIPPED").not());
}
