//! End-to-end tests for the protodeck CLI against a file-backed store.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn protodeck() -> Command {
    cargo_bin_cmd!("protodeck")
}

/// Each test runs in its own directory so the default file backend
/// writes data/features.json there.
fn workdir() -> TempDir {
    TempDir::new().unwrap()
}

#[test]
fn test_help() {
    protodeck().arg("--help").assert().success();
}

#[test]
fn test_version() {
    protodeck().arg("--version").assert().success();
}

#[test]
fn test_list_seeds_an_empty_store() {
    let dir = workdir();

    protodeck()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Raz Sleep Journal"))
        .stdout(predicate::str::contains("4 of 4 features"));

    // The seed was persisted
    let data = dir.path().join("data/features.json");
    assert!(data.exists());
    let raw = fs::read_to_string(data).unwrap();
    assert!(raw.contains("raz-sleep-journal"));
}

#[test]
fn test_list_with_filters() {
    let dir = workdir();

    // Seeds are all in_progress
    protodeck()
        .current_dir(dir.path())
        .args(["list", "--status", "released"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 of 4 features"));

    protodeck()
        .current_dir(dir.path())
        .args(["list", "--released", "unreleased"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 of 4 features"));
}

#[test]
fn test_list_rejects_bad_sort() {
    let dir = workdir();

    protodeck()
        .current_dir(dir.path())
        .args(["list", "--sort", "newest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid sort option"));
}

#[test]
fn test_add_then_list_shows_new_feature() {
    let dir = workdir();
    let payload = dir.path().join("feature.json");
    fs::write(
        &payload,
        r#"{
            "id": "night-light-tuner",
            "title": "Night Light Tuner",
            "description": "Adjustable color temperature",
            "webUrl": "https://prototypes.example.com/night-light-tuner",
            "owner": "Test Owner",
            "team": "Kids",
            "pillar": "Pillar 2",
            "status": "in_progress",
            "dateCreated": "2026-07-01"
        }"#,
    )
    .unwrap();

    protodeck()
        .current_dir(dir.path())
        .arg("add")
        .arg(&payload)
        .assert()
        .success()
        .stdout(predicate::str::contains("Added feature Night Light Tuner"));

    protodeck()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("night-light-tuner"))
        .stdout(predicate::str::contains("5 of 5 features"));
}

#[test]
fn test_add_duplicate_id_fails() {
    let dir = workdir();
    let payload = dir.path().join("feature.json");
    fs::write(
        &payload,
        r#"{
            "id": "raz-sleep-journal",
            "title": "Imposter",
            "description": "d",
            "webUrl": "u",
            "owner": "o",
            "team": "Kids",
            "pillar": "Pillar 2",
            "status": "in_progress",
            "dateCreated": "2026-07-01"
        }"#,
    )
    .unwrap();

    // First list seeds the store so the id exists
    protodeck().current_dir(dir.path()).arg("list").assert().success();

    protodeck()
        .current_dir(dir.path())
        .arg("add")
        .arg(&payload)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_rm_removes_exactly_once() {
    let dir = workdir();

    protodeck()
        .current_dir(dir.path())
        .args(["rm", "web-library"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed feature web-library"));

    protodeck()
        .current_dir(dir.path())
        .args(["rm", "web-library"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No feature with id"));
}

#[test]
fn test_flag_appends_to_feature() {
    let dir = workdir();

    protodeck()
        .current_dir(dir.path())
        .args([
            "flag",
            "raz-sleep-journal",
            "web_dev_test",
            "--experiment",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added flag web_dev_test"));

    protodeck()
        .current_dir(dir.path())
        .args(["flag", "raz-sleep-journal", "sleep_gate", "--gate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("web_dev_test, sleep_gate"));
}

#[test]
fn test_flag_unknown_feature_fails() {
    let dir = workdir();

    protodeck()
        .current_dir(dir.path())
        .args(["flag", "ghost", "some_flag"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No feature with id"));
}

#[test]
fn test_config_file_selects_backend() {
    let dir = workdir();
    fs::write(
        dir.path().join("protodeck.toml"),
        "[storage]\nbackend = \"file\"\npath = \"elsewhere/catalog.json\"\n",
    )
    .unwrap();

    protodeck()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success();

    assert!(dir.path().join("elsewhere/catalog.json").exists());
    assert!(!dir.path().join("data/features.json").exists());
}
