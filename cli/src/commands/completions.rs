//! # dtool `completions` Command
//!
//! File: cli/src/commands/completions.rs
//!
//! Prints a shell completion script for `dtool` to stdout. Needs neither the
//! configuration nor a Docker daemon.
//!
//! ```bash
//! dtool completions bash > ~/.local/share/bash-completion/completions/dtool
//! dtool completions zsh > "${fpath[1]}/_dtool"
//! ```
//!
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use clap_complete::Shell;
use std::io::{self, Write};
use tracing::info;

/// # `completions` Arguments (`CompletionsArgs`)
#[derive(Parser, Debug)]
#[command(about = "🔧 Print a shell completion script")]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    shell: Shell,
}

/// Writes the completion script for `shell` into `out`.
pub fn write_completions(shell: Shell, cmd: &mut clap::Command, out: &mut dyn Write) {
    clap_complete::generate(shell, cmd, "dtool", out);
}

/// Handles `dtool completions`.
pub fn handle_completions(args: CompletionsArgs, cmd: &mut clap::Command) -> Result<()> {
    info!("Generating {} completions", args.shell);
    let mut stdout = io::stdout().lock();
    write_completions(args.shell, cmd, &mut stdout);
    stdout.flush().context("Failed to flush completion script")?;
    Ok(())
}
