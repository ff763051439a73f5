//! # dtool CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! pulls this in with `mod common;`.
//!

// Not every test file uses every helper.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// A socket path no daemon listens on.
pub const UNREACHABLE_DOCKER_HOST: &str = "unix:///nonexistent/dtool-test/docker.sock";

/// Creates an `assert_cmd::Command` for the compiled `dtool` binary.
///
/// ## Panics
/// Panics if the `dtool` binary cannot be found via `Command::cargo_bin`.
pub fn dtool_cmd() -> Command {
    let mut cmd = Command::cargo_bin("dtool").expect("Failed to find dtool binary for testing");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

/// A `dtool` command pointed at a daemon that is not there, using the
/// config file at `config`.
pub fn dtool_without_daemon(config: &Path) -> Command {
    let mut cmd = dtool_cmd();
    cmd.env("DOCKER_HOST", UNREACHABLE_DOCKER_HOST)
        .env("DTOOL_CONFIG", config);
    cmd
}

/// Writes `contents` to a `config.toml` in a fresh temporary directory.
pub fn temp_config(contents: &str) -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, contents).expect("Failed to write config.toml");
    (dir, path)
}
