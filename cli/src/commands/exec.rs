//! # dtool `exec` Command
//!
//! File: cli/src/commands/exec.rs
//!
//! Runs a command inside a running container and prints its output as it
//! arrives, one chunk at a time. dtool exits with the command's exit code.
//!
//! ```bash
//! dtool exec web -- ls -la /usr/share/nginx/html
//! dtool exec db -- psql -U postgres -c 'select 1'
//! dtool exec web --capture-to out.log -- cat /etc/os-release
//! ```
//!
use crate::{
    common::docker::{ExecChunk, RuntimeClient},
    core::error::{DtoolError, Result},
};
use anyhow::{anyhow, Context};
use clap::Parser;
use std::path::PathBuf;
use tokio::io::{stderr, stdout, AsyncWriteExt};
use tracing::{debug, info, warn};

/// # `exec` Arguments (`ExecArgs`)
#[derive(Parser, Debug)]
#[command(about = "⚡ Execute a command in a running container")]
pub struct ExecArgs {
    /// Container name or ID.
    container: String,

    /// Also write everything the command printed to this file.
    #[arg(long, value_name = "FILE")]
    capture_to: Option<PathBuf>,

    /// Command and arguments, after `--`.
    #[arg(required = true, last = true)]
    command: Vec<String>,
}

/// Handles `dtool exec`.
///
/// # Errors
///
/// * `DtoolError::ContainerNotFound` / `DtoolError::ContainerNotRunning` - checked first.
/// * `DtoolError::ExecFailed` - the command exited non-zero.
pub async fn handle_exec(args: ExecArgs, client: &RuntimeClient) -> Result<()> {
    info!(
        "Handling exec command (Container: {}, Command: {:?})",
        args.container, args.command
    );

    let mut stream = client.stream_exec(&args.container, &args.command).await?;
    if args.capture_to.is_some() {
        stream = stream.with_capture();
    }
    debug!("Streaming output of exec '{}'", stream.exec_id());
    let mut out = stdout();
    let mut err = stderr();

    while let Some(chunk) = stream.next_chunk().await? {
        match &chunk {
            ExecChunk::Stdout(text) => {
                out.write_all(text.as_bytes())
                    .await
                    .context("Failed to write exec output to stdout")?;
                out.flush().await.context("Failed to flush stdout")?;
            }
            ExecChunk::Stderr(text) => {
                err.write_all(text.as_bytes())
                    .await
                    .context("Failed to write exec output to stderr")?;
                err.flush().await.context("Failed to flush stderr")?;
            }
        }
    }

    if let Some(path) = &args.capture_to {
        tokio::fs::write(path, stream.captured().concat())
            .await
            .with_context(|| format!("Failed to write captured output to {}", path.display()))?;
        info!("Captured exec output written to {}", path.display());
    }

    let code = stream.exit_code().await?;
    if code != 0 {
        warn!("Command {:?} exited with code {}", args.command, code);
        return Err(anyhow!(DtoolError::ExecFailed {
            container: args.container,
            code,
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec_args_parsing() {
        let args = ExecArgs::try_parse_from(["exec", "web", "--", "ls", "-la"]).unwrap();
        assert_eq!(args.container, "web");
        assert_eq!(args.command, vec!["ls", "-la"]);
        assert!(args.capture_to.is_none());
    }

    #[test]
    fn test_exec_args_capture_to() {
        let args =
            ExecArgs::try_parse_from(["exec", "web", "--capture-to", "out.log", "--", "env"])
                .unwrap();
        assert_eq!(args.capture_to, Some(PathBuf::from("out.log")));
        assert_eq!(args.command, vec!["env"]);
    }

    #[test]
    fn test_exec_requires_command() {
        assert!(ExecArgs::try_parse_from(["exec", "web"]).is_err());
    }
}
