use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_shows_usage_and_checkers() {
    Command::cargo_bin("bw")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("sale"))
        .stdout(predicate::str::contains("releases"))
        .stdout(predicate::str::contains("paper"))
        .stdout(predicate::str::contains("today"));
}

#[test]
fn version_flag_works() {
    Command::cargo_bin("bw")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bw"));
}

#[test]
fn subcommand_help_documents_flags() {
    Command::cargo_bin("bw")
        .unwrap()
        .args(["sale", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--organize"));

    Command::cargo_bin("bw")
        .unwrap()
        .args(["releases", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--show-next"));
}
