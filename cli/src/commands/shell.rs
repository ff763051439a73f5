//! # dtool `shell` Command
//!
//! File: cli/src/commands/shell.rs
//!
//! Opens an interactive shell in a running container by handing the terminal
//! to the engine's own CLI (`docker exec -it <id> /bin/sh`). dtool waits for
//! the session to end and exits with its status; it does nothing else
//! afterwards.
//!
//! ```bash
//! dtool shell web
//! dtool shell web --shell /bin/bash
//! ```
//!
use crate::{
    common::docker::RuntimeClient,
    core::{
        config::Config,
        error::{DtoolError, Result},
    },
};
use anyhow::anyhow;
use clap::Parser;
use tracing::{debug, info};

/// # `shell` Arguments (`ShellArgs`)
#[derive(Parser, Debug)]
#[command(about = "🐚 Open an interactive shell in a running container")]
pub struct ShellArgs {
    /// Container name or ID.
    container: String,

    /// Shell to start (defaults to `shell.default` from the config, `/bin/sh`).
    #[arg(long, short)]
    shell: Option<String>,
}

/// Handles `dtool shell`.
///
/// # Errors
///
/// * `DtoolError::ContainerNotFound` / `DtoolError::ContainerNotRunning` - checked before attaching.
/// * `DtoolError::ShellExited` - the session ended with a non-zero status.
pub async fn handle_shell(args: ShellArgs, client: &RuntimeClient, cfg: &Config) -> Result<()> {
    let shell = args.shell.as_deref().unwrap_or(&cfg.shell.default);
    info!(
        "Handling shell command (Container: {}, Shell: {})",
        args.container, shell
    );

    let status = client
        .open_interactive_session(&args.container, &cfg.engine.cli, shell)
        .await?;
    debug!("Shell session ended with {}", status);

    if !status.success() {
        return Err(anyhow!(DtoolError::ShellExited {
            container: args.container,
            // Killed by a signal: no code.
            code: status.code().unwrap_or(1),
        }));
    }
    Ok(())
}
