mod common;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const BIN_NAME: &str = "expense_median_cli";

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("EXPENSE_MEDIAN_HOME", home.path())
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0");
    cmd
}

#[test]
fn median_command_prints_both_strategies() {
    let home = TempDir::new().expect("home dir");
    let (_guard, path) = common::write_ledger(&common::task_ledger());

    cli(&home)
        .arg("median")
        .arg(&path)
        .arg("both")
        .assert()
        .success()
        .stdout(contains("sort: 11.72").and(contains("quickselect: 11.72")))
        .stdout(contains("11 kept"));
}

#[test]
fn median_of_empty_ledger_is_none() {
    let home = TempDir::new().expect("home dir");
    let (_guard, path) = common::write_ledger(&common::ledger_with(&[]));

    cli(&home)
        .args(["median"])
        .arg(&path)
        .arg("sort")
        .assert()
        .success()
        .stdout(contains("sort: none"));
}

#[test]
fn configured_strategy_is_the_default() {
    let home = TempDir::new().expect("home dir");
    std::fs::write(home.path().join("config.json"), r#"{ "strategy": "sort" }"#)
        .expect("write config");
    let (_guard, path) = common::write_ledger(&common::ledger_with(&[10.0, 20.0, 30.0]));

    cli(&home)
        .arg("median")
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("sort: 20").and(contains("quickselect").not()));
}

#[test]
fn compare_command_reports_agreement() {
    let home = TempDir::new().expect("home dir");
    let (_guard, path) = common::write_ledger(&common::task_ledger());

    cli(&home)
        .arg("compare")
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("agreement: MATCH"));
}

#[test]
fn cutoff_command_prints_first_sunday() {
    let home = TempDir::new().expect("home dir");
    cli(&home)
        .args(["cutoff", "2023", "3"])
        .assert()
        .success()
        .stdout("5\n");
    cli(&home)
        .args(["cutoff", "2023", "13"])
        .assert()
        .failure();
}

#[test]
fn generate_command_emits_ledger_json() {
    let home = TempDir::new().expect("home dir");
    let output = cli(&home)
        .args(["generate", "25", "sorted", "1"])
        .output()
        .expect("run generate");
    assert!(output.status.success());

    let ledger: expense_median::Ledger =
        serde_json::from_slice(&output.stdout).expect("ledger json");
    // The sorted ramp starts at zero, which is not an amount.
    assert_eq!(expense_median::flatten(&ledger).len(), 24);
}

#[test]
fn fixtures_command_passes() {
    let home = TempDir::new().expect("home dir");
    cli(&home)
        .arg("fixtures")
        .assert()
        .success()
        .stdout(contains("invalid data: MATCH"));
}

#[test]
fn bench_command_accepts_custom_sizes() {
    let home = TempDir::new().expect("home dir");
    cli(&home)
        .args(["bench", "100", "101"])
        .assert()
        .success()
        .stdout(contains("Average speedup by size").and(contains("reverse-sorted")));
}

#[test]
fn unknown_strategy_fails() {
    let home = TempDir::new().expect("home dir");
    let (_guard, path) = common::write_ledger(&common::task_ledger());

    cli(&home)
        .arg("median")
        .arg(&path)
        .arg("bogosort")
        .assert()
        .failure()
        .stderr(contains("Unknown strategy"));
}

#[test]
fn missing_command_prints_usage() {
    let home = TempDir::new().expect("home dir");
    cli(&home)
        .assert()
        .failure()
        .stderr(contains("Usage: expense_median_cli"));
}

#[test]
fn version_command_prints_build_metadata() {
    let home = TempDir::new().expect("home dir");
    cli(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(contains("expense_median"));
}
