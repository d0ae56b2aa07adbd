// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box runs of the checkers against a file store.
//!
//! Only paths that never touch the network: organize, empty catalogs, and
//! schedule inspection.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};

fn write_config(dir: &Path) -> PathBuf {
    let store = dir.join("data");
    std::fs::create_dir_all(&store).unwrap();
    let path = dir.join("bookwatch.toml");
    std::fs::write(
        &path,
        format!(
            r#"
[store]
path = "{}"

[lookup]
endpoint = "http://localhost:1/api"

[sale]
catalog_key = "sale.json"
cursor_key = "cursors/sale"

[releases]
catalog_key = "releases.json"
cursor_key = "cursors/releases"

[paper]
catalog_key = "paper.json"
cursor_key = "cursors/paper"
sale_key = "sale.json"
"#,
            store.display()
        ),
    )
    .unwrap();
    path
}

fn seed(dir: &Path, key: &str, json: &str) {
    let path = dir.join("data").join(key);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, json).unwrap();
}

fn edition_json(asin: &str, title: &str, date: &str) -> String {
    format!(
        r#"{{"ASIN":"{asin}","Title":"{title}","ReleaseDate":"{date}","CurrentPrice":660.0,"MaxPrice":660.0,"URL":"https://example.com/dp/{asin}"}}"#
    )
}

fn bw(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bw").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn help_lists_the_checkers() {
    Command::cargo_bin("bw")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sale"))
        .stdout(predicate::str::contains("releases"))
        .stdout(predicate::str::contains("paper"));
}

#[test]
fn missing_config_file_fails_with_its_path() {
    Command::cargo_bin("bw")
        .unwrap()
        .args(["--config", "/nonexistent/bookwatch.toml", "sale"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/bookwatch.toml"));
}

#[test]
fn organize_sorts_the_watch_list_once() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    // Older release listed first; canonical order puts the newer one first.
    seed(
        dir.path(),
        "sale.json",
        &format!(
            "[{},{}]",
            edition_json("B001", "Older", "2025-01-01T00:00:00Z"),
            edition_json("B002", "Newer", "2026-01-01T00:00:00Z")
        ),
    );

    bw(&config)
        .args(["sale", "--organize"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Organized 2 editions"));

    bw(&config)
        .args(["sale", "--organize"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already organized"));

    let stored = std::fs::read_to_string(dir.path().join("data/sale.json")).unwrap();
    assert!(stored.find("B002").unwrap() < stored.find("B001").unwrap());
}

#[test]
fn empty_watch_list_checks_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    seed(dir.path(), "sale.json", "[]");

    bw(&config)
        .arg("sale")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to check"));
}

#[test]
fn missing_watch_list_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    bw(&config)
        .arg("sale")
        .assert()
        .failure()
        .stderr(predicate::str::contains("sale.json"));
}

#[test]
fn today_announces_release_day_editions() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let now = chrono::Utc::now().to_rfc3339();
    seed(
        dir.path(),
        "sale.json",
        &format!("[{}]", edition_json("B001", "Due Today", &now)),
    );

    bw(&config)
        .arg("today")
        .assert()
        .success()
        .stdout(predicate::str::contains("Released today: 1"));
}

#[test]
fn today_with_no_releases_reports_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    seed(
        dir.path(),
        "sale.json",
        &format!("[{}]", edition_json("B001", "Old", "2020-01-01T00:00:00Z")),
    );

    bw(&config)
        .arg("today")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing released today"));
}

#[test]
fn show_next_prints_the_schedule() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    seed(
        dir.path(),
        "releases.json",
        &format!(
            "[{},{}]",
            edition_json("B001", "Series A (1)", "2026-01-01T00:00:00Z"),
            edition_json("B002", "Series B (1)", "2025-01-01T00:00:00Z")
        ),
    );

    bw(&config)
        .args(["releases", "--show-next"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current slot:"))
        .stdout(predicate::str::contains("Next slot at"));
}
