//! # dtool CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! Top-level behaviour that needs no Docker daemon: `--help`, `--version`
//! and argument errors.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    dtool_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ps"))
        .stdout(predicate::str::contains("shell"))
        .stdout(predicate::str::contains("exec"));
}

#[test]
fn test_no_arguments_shows_help() {
    // clap prints help to stderr and exits 2 when a subcommand is required.
    dtool_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_version_flags() {
    let expected = format!("Docker Tool version {}", env!("CARGO_PKG_VERSION"));
    for flag in ["-v", "--version"] {
        dtool_cmd()
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains(expected.clone()));
    }
}

#[test]
fn test_version_needs_no_daemon() {
    dtool_cmd()
        .env("DOCKER_HOST", UNREACHABLE_DOCKER_HOST)
        .arg("--version")
        .assert()
        .success();
}

#[test]
fn test_ps_help() {
    dtool_cmd()
        .args(["ps", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--all"))
        .stdout(predicate::str::contains("--regex"));
}

#[test]
fn test_unknown_subcommand_fails() {
    dtool_cmd()
        .arg("rm")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_exec_requires_command() {
    dtool_cmd()
        .args(["exec", "web"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_completions_bash() {
    dtool_cmd()
        .env("DOCKER_HOST", UNREACHABLE_DOCKER_HOST)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dtool"))
        .stderr(predicate::str::contains("Docker daemon is not running").not());
}

#[test]
fn test_completions_rejects_unknown_shell() {
    dtool_cmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .code(2);
}
