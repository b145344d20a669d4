//! Integration tests for the yumdbus CLI.
//!
//! These tests run the compiled binary and verify its output. None of them
//! need a running yum daemon.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn yumdbus() -> Command {
    let mut cmd = cargo_bin_cmd!("yumdbus");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_help_lists_bus_flags() {
    yumdbus()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--session"))
        .stdout(predicate::str::contains("--address"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn cli_session_and_address_conflict() {
    yumdbus()
        .args(["--session", "--address", "unix:path=/nonexistent/bus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn cli_unreachable_bus_aborts_without_output() {
    yumdbus()
        .args(["--address", "unix:path=/nonexistent/yumdbus-cli/bus"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unable to reach the yum D-Bus service"));
}

#[test]
fn cli_rejects_pattern_argument() {
    yumdbus().arg("kernel*").assert().failure();
}
