//! # dtool Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by every command:
//! - `config`: loading and validating `config.toml`
//! - `error`: the `DtoolError` enum and the `Result` alias
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{DtoolError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
