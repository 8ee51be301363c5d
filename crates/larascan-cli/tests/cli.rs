//! Binary-level tests for the `larascan` command.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn larascan(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("larascan").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("LARASCAN_CONFIG")
        .arg("--no-color")
        .arg("--config")
        .arg(config);
    cmd
}

fn config_file() -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    (dir, path)
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("larascan")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("checks"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_zero_threads_is_rejected() {
    let (_dir, path) = config_file();
    larascan(&path)
        .args(["scan", "--url", "http://127.0.0.1:1", "--threads", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--threads"));
}

#[test]
fn test_missing_url_is_rejected() {
    let (_dir, path) = config_file();
    larascan(&path).arg("scan").assert().failure();
    larascan(&path)
        .args(["scan", "--url", ""])
        .assert()
        .failure();
}

#[test]
fn test_checks_listing() {
    let (_dir, path) = config_file();
    larascan(&path)
        .arg("checks")
        .assert()
        .success()
        .stdout(predicate::str::contains("Recon"))
        .stdout(predicate::str::contains("Vulnerabilities"))
        .stdout(predicate::str::contains("Subdomain Enumeration"))
        .stdout(predicate::str::contains("Total: 10 checks"));
}

#[test]
fn test_checks_as_json() {
    let (_dir, path) = config_file();
    let output = larascan(&path)
        .args(["checks", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 10);
    assert_eq!(entries[0]["category"], "Recon");
    assert_eq!(entries[9]["category"], "Vulnerabilities");
}

#[test]
fn test_config_set_and_show() {
    let (_dir, path) = config_file();

    larascan(&path)
        .args(["config", "set", "threads", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("threads set to 7"));
    assert!(path.exists());

    larascan(&path)
        .args(["config", "show", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"threads\": 7"));
}

#[test]
fn test_config_set_rejects_invalid_value() {
    let (_dir, path) = config_file();

    larascan(&path)
        .args(["config", "set", "threads", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("threads must be greater than 0"));
    assert!(!path.exists());
}

#[test]
fn test_config_path_honours_override() {
    let (_dir, path) = config_file();

    larascan(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(path.to_string_lossy().as_ref()));
}

#[test]
fn test_scan_unreachable_target_reports_failures() {
    let (_dir, path) = config_file();

    let output = larascan(&path)
        .args([
            "scan",
            "--url",
            "http://127.0.0.1:1",
            "--category",
            "vulnerabilities",
            "--timeout",
            "2",
            "--sort",
            "-o",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["target"], "http://127.0.0.1:1");

    let findings = report["findings"].as_array().unwrap();
    let names: Vec<&str> = findings
        .iter()
        .map(|f| f["scan_name"].as_str().unwrap())
        .collect();
    for expected in ["CSRF Token", "Debug Mode", "Laravel Tools", "Sensitive Files"] {
        assert!(names.contains(&expected), "missing {expected}");
    }
    assert!(!names.contains(&"Subdomain Enumeration"));

    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}
