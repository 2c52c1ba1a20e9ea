//! Integration tests driving the binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("transparency-data-downloader").unwrap();
    cmd.env_remove("PORTAL_BASE_URL").env_remove("PORTAL_UNIT_CODE");
    cmd
}

#[test]
fn test_inverted_range_is_a_startup_fault() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("dados");

    bin()
        .args(["download", "--start-date", "2024-01-01", "--end-date", "2023-01-01"])
        .arg("--output-dir")
        .arg(&output_dir)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("must not be after"));

    // Validation happens before anything touches the filesystem
    assert!(!output_dir.exists());
}

#[test]
fn test_unparsable_date_is_a_startup_fault() {
    bin()
        .args(["download", "--start-date", "01/01/2021"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--start-date"));
}

#[test]
fn test_datasets_json_listing() {
    let output = bin()
        .args(["--output-format", "json", "datasets"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let rows: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 5);

    let despesa = rows.iter().find(|r| r["id"] == "despesa").unwrap();
    assert_eq!(despesa["group"], "month_range");
    assert_eq!(despesa["default"], true);

    let contrato = rows.iter().find(|r| r["id"] == "contrato").unwrap();
    assert_eq!(contrato["group"], "day_range");
    assert_eq!(contrato["default"], false);
}

#[test]
fn test_datasets_human_listing_with_filter() {
    bin()
        .args(["datasets", "--group", "month_range"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 dataset types"))
        .stdout(predicate::str::contains("despesaOrcamentaria"))
        .stdout(predicate::str::contains("licitacao").not());
}

#[test]
fn test_unreachable_portal_still_exits_zero() {
    let temp_dir = TempDir::new().unwrap();

    let output = bin()
        .args([
            "--output-format",
            "json",
            "download",
            "--dataset",
            "despesa",
            "--start-date",
            "2022-01-01",
            "--end-date",
            "2022-12-31",
            "--base-url",
            "http://127.0.0.1:9/api",
        ])
        .arg("--output-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let despesa = &report["datasets"][0];
    assert_eq!(despesa["dataset"], "despesa");
    assert_eq!(despesa["status"], "completed");
    assert_eq!(despesa["skipped"], 1);
    assert_eq!(despesa["outcomes"][0]["result"], "skipped");
    assert_eq!(despesa["outcomes"][0]["stage"], "fetch");
}
