//! # dtool Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! One module per subcommand. Each defines a clap `Args` struct and an async
//! `handle_*` function that receives the already-connected `RuntimeClient`.
//!
//! - `completions`: shell completion scripts (no daemon needed)
//! - `ps`: list and filter containers
//! - `shell`: interactive shell hand-off
//! - `exec`: stream a command's output
//!
//! This module also owns the daemon-health gate every subcommand goes through.
//!
use crate::{
    common::docker::RuntimeClient,
    core::error::{DtoolError, Result},
};
use anyhow::anyhow;
use tracing::debug;

/// `dtool completions`: shell completion scripts.
pub mod completions;
/// `dtool exec`: run a command in a running container.
pub mod exec;
/// `dtool ps`: list containers.
pub mod ps;
/// `dtool shell`: interactive shell in a running container.
pub mod shell;

/// Connects to the daemon and checks that it answers.
///
/// # Errors
///
/// `DtoolError::DaemonUnavailable` when the client cannot be built or the
/// ping fails. Nothing is retried.
pub async fn connect_checked() -> Result<RuntimeClient> {
    let client = match RuntimeClient::connect() {
        Ok(client) => client,
        Err(e) => {
            debug!("Could not build Docker client: {:#}", e);
            return Err(anyhow!(DtoolError::DaemonUnavailable));
        }
    };
    if !client.daemon_is_running().await {
        return Err(anyhow!(DtoolError::DaemonUnavailable));
    }
    Ok(client)
}
