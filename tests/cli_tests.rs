//! CLI integration tests for the rulegen binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn rulegen() -> Command {
    Command::cargo_bin("rulegen").expect("binary builds")
}

fn seed_macros(dir: &std::path::Path) {
    fs::write(
        dir.join("int_assign.md"),
        "Const gcsXLSheet As String = \"IntAssign\"\n\
         Const gcsOutFile As String = \"assignment%\"\n",
    )
    .unwrap();
    fs::write(dir.join("all.md"), "reserved aggregate").unwrap();
}

#[test]
fn test_no_args_shows_usage() {
    rulegen()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_list_shows_definitions() {
    let dir = tempfile::tempdir().unwrap();
    seed_macros(dir.path());

    rulegen()
        .args(["list", "--macros-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("int_assign"))
        .stdout(predicate::str::contains("IntAssign"))
        .stdout(predicate::str::contains("all (").not());
}

#[test]
fn test_list_empty_directory() {
    let dir = tempfile::tempdir().unwrap();

    rulegen()
        .args(["list", "--macros-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No macro definitions found"));
}

#[test]
fn test_show_json_output() {
    let dir = tempfile::tempdir().unwrap();
    seed_macros(dir.path());

    let output = rulegen()
        .args(["show", "int_assign", "--json", "--macros-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let config: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(config["xl_sheet"], "IntAssign");
    assert_eq!(config["out_file"], "assignment%");
    assert_eq!(config["out_loop"], false);
}

#[test]
fn test_show_missing_definition_fails() {
    let dir = tempfile::tempdir().unwrap();

    rulegen()
        .args(["show", "ghost", "--macros-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn test_run_missing_workbook_fails() {
    rulegen()
        .args(["run", "no-such-workbook.xlsx", "--release", "R2.1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open"));
}
