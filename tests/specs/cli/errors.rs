use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn unknown_subcommand_is_rejected() {
    Command::cargo_bin("bw")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn missing_config_names_the_path() {
    Command::cargo_bin("bw")
        .unwrap()
        .args(["--config", "/nonexistent/bookwatch.toml", "paper"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/bookwatch.toml"));
}

#[test]
fn no_subcommand_prints_usage() {
    Command::cargo_bin("bw")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
