//! Version string reported by `dtool --version`.
//!
//! File: cli/src/version.rs
//!
//! Rewritten by the `bump-version` release helper together with
//! `cli/Cargo.toml`. Keep the literal on a single line.

pub const VERSION: &str = "0.1.0";
