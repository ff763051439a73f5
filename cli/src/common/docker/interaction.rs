//! # dtool Docker Interaction
//!
//! File: cli/src/common/docker/interaction.rs
//!
//! ## Overview
//!
//! Working with a *running* container:
//!
//! - **`open_interactive_session`**: checks the container is running, then
//!   hands the terminal to `<engine> exec -it <id> <shell>` and waits for it.
//!   This is a one-way hand-off: the caller only gets the exit status back.
//! - **`stream_exec`**: creates and starts an exec instance and returns an
//!   `ExecStream`, a finite, non-restartable sequence of output chunks that
//!   ends when the remote process exits.
//!
//! Both refuse to touch a container that is not running
//! (`DtoolError::ContainerNotRunning`); neither starts stopped containers.
//!
//! ```rust
//! let mut stream = client.stream_exec("web", &["ls".into(), "-la".into()]).await?;
//! while let Some(chunk) = stream.next_chunk().await? {
//!     print!("{}", chunk.text());
//! }
//! let code = stream.exit_code().await?;
//! ```
//!
use super::connect::RuntimeClient;
use super::record::ContainerRecord;
use crate::core::error::{DtoolError, Result};
use anyhow::{anyhow, Context};
use bollard::{
    container::LogOutput,
    exec::{CreateExecOptions, StartExecResults},
    Docker,
};
use colored::Colorize;
use futures_util::{stream::BoxStream, StreamExt};
use std::process::{ExitStatus, Stdio};
use tracing::{debug, info, instrument, warn};

/// One piece of exec output, decoded as (lossy) UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecChunk {
    Stdout(String),
    Stderr(String),
}

impl ExecChunk {
    pub fn text(&self) -> &str {
        match self {
            ExecChunk::Stdout(text) | ExecChunk::Stderr(text) => text,
        }
    }
}

/// Decodes raw exec frames and optionally records them.
#[derive(Debug, Default)]
struct ChunkDecoder {
    capture: bool,
    captured: Vec<String>,
}

impl ChunkDecoder {
    fn accept(&mut self, frame: LogOutput) -> Option<ExecChunk> {
        let chunk = match frame {
            // A TTY exec multiplexes everything onto the console stream.
            LogOutput::StdOut { message } | LogOutput::Console { message } => {
                ExecChunk::Stdout(String::from_utf8_lossy(&message).into_owned())
            }
            LogOutput::StdErr { message } => {
                ExecChunk::Stderr(String::from_utf8_lossy(&message).into_owned())
            }
            LogOutput::StdIn { .. } => return None,
        };
        if self.capture {
            self.captured.push(chunk.text().to_string());
        }
        Some(chunk)
    }
}

/// Output of a started exec instance.
pub struct ExecStream {
    docker: Docker,
    exec_id: String,
    container: String,
    output: BoxStream<'static, std::result::Result<LogOutput, bollard::errors::Error>>,
    decoder: ChunkDecoder,
    finished: bool,
}

impl std::fmt::Debug for ExecStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecStream")
            .field("exec_id", &self.exec_id)
            .field("container", &self.container)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl ExecStream {
    /// Records every chunk yielded from now on; see `captured`.
    pub fn with_capture(mut self) -> Self {
        self.decoder.capture = true;
        self
    }

    pub fn exec_id(&self) -> &str {
        &self.exec_id
    }

    /// Chunks yielded so far when capture is enabled, otherwise empty.
    pub fn captured(&self) -> &[String] {
        &self.decoder.captured
    }

    /// Waits for the next chunk. `Ok(None)` once the remote process has exited;
    /// every later call keeps returning `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `DtoolError::RuntimeUnavailable` / `DtoolError::DockerApi` if the
    /// stream breaks before the process exits.
    pub async fn next_chunk(&mut self) -> Result<Option<ExecChunk>> {
        while !self.finished {
            match self.output.next().await {
                Some(Ok(frame)) => {
                    if let Some(chunk) = self.decoder.accept(frame) {
                        return Ok(Some(chunk));
                    }
                }
                Some(Err(e)) => {
                    self.finished = true;
                    return Err(anyhow!(DtoolError::from_bollard(e)).context(format!(
                        "Error reading exec output from container '{}'",
                        self.container
                    )));
                }
                None => {
                    debug!("Exec '{}' output stream finished.", self.exec_id);
                    self.finished = true;
                }
            }
        }
        Ok(None)
    }

    /// Exit code of the finished command, `-1` if the daemon did not report one.
    pub async fn exit_code(&self) -> Result<i64> {
        let inspect = self.docker.inspect_exec(&self.exec_id).await.map_err(|e| {
            anyhow!(DtoolError::from_bollard(e)).context(format!(
                "Failed to inspect exec instance '{}' after execution",
                self.exec_id
            ))
        })?;
        let code = inspect.exit_code.unwrap_or(-1);
        info!("Exec instance '{}' finished with exit code: {}", self.exec_id, code);
        Ok(code)
    }
}

impl RuntimeClient {
    async fn require_running(&self, name_or_id: &str) -> Result<ContainerRecord> {
        let record = self.get_container(name_or_id).await?;
        if !record.status.is_running() {
            warn!(
                "Container '{}' is {}, refusing to attach.",
                name_or_id, record.status
            );
            return Err(anyhow!(DtoolError::ContainerNotRunning {
                name: name_or_id.to_string(),
                status: record.status.to_string(),
            }));
        }
        Ok(record)
    }

    /// Hands the terminal to the engine CLI for an interactive shell.
    ///
    /// # Arguments
    ///
    /// * `name_or_id` - Target container.
    /// * `engine_cli` - Engine CLI binary, e.g. `docker`.
    /// * `shell` - Shell to start inside the container, e.g. `/bin/sh`.
    ///
    /// # Returns
    ///
    /// The exit status of the engine CLI once the session ends.
    ///
    /// # Errors
    ///
    /// * `DtoolError::ContainerNotFound` / `DtoolError::ContainerNotRunning` - checked before attaching.
    /// * The engine CLI could not be spawned.
    #[instrument(skip(self, name_or_id), fields(container = %name_or_id))]
    pub async fn open_interactive_session(
        &self,
        name_or_id: &str,
        engine_cli: &str,
        shell: &str,
    ) -> Result<ExitStatus> {
        let record = self.require_running(name_or_id).await?;

        println!(
            "\n{} {} {}\n",
            "Entering shell in container".green().bold(),
            record.name.cyan(),
            format!("({})", record.short_id).dimmed()
        );

        let args = ["exec", "-it", record.id.as_str(), shell];
        info!("Handing terminal to: {} {:?}", engine_cli, args);
        tokio::process::Command::new(engine_cli)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .with_context(|| {
                format!(
                    "Failed to execute '{}'. Is it installed and in PATH?",
                    engine_cli
                )
            })
    }

    /// Starts `command` inside a running container and returns its output stream.
    ///
    /// A TTY is allocated so interactive programs behave; stdin is not forwarded.
    ///
    /// # Errors
    ///
    /// * `DtoolError::ContainerNotFound` / `DtoolError::ContainerNotRunning` - checked first.
    /// * `DtoolError::DockerApi` / `DtoolError::RuntimeUnavailable` - creating or starting the exec failed.
    #[instrument(skip(self, name_or_id, command), fields(container = %name_or_id))]
    pub async fn stream_exec(&self, name_or_id: &str, command: &[String]) -> Result<ExecStream> {
        let record = self.require_running(name_or_id).await?;

        info!(
            "Creating exec instance in container '{}' for command: {:?}",
            record.name, command
        );
        let exec_options = CreateExecOptions {
            attach_stdout: Some(true),
            attach_stderr: Some(true),
            tty: Some(true),
            cmd: Some(command.to_vec()),
            ..Default::default()
        };
        let created = self
            .docker
            .create_exec(&record.id, exec_options)
            .await
            .map_err(|e| {
                anyhow!(DtoolError::from_bollard(e)).context(format!(
                    "Failed to create exec instance in container '{}'",
                    name_or_id
                ))
            })?;
        let exec_id = created.id;
        debug!("Created exec instance ID: {}", exec_id);

        let started = self.docker.start_exec(&exec_id, None).await.map_err(|e| {
            anyhow!(DtoolError::from_bollard(e)).context("Failed to start exec instance")
        })?;
        let output = match started {
            StartExecResults::Attached { output, .. } => output,
            StartExecResults::Detached => {
                warn!("Exec instance '{}' started detached; no output.", exec_id);
                futures_util::stream::empty().boxed()
            }
        };

        Ok(ExecStream {
            docker: self.docker.clone(),
            exec_id,
            container: name_or_id.to_string(),
            output,
            decoder: ChunkDecoder::default(),
            finished: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stdout(text: &str) -> LogOutput {
        LogOutput::StdOut {
            message: text.as_bytes().to_vec().into(),
        }
    }

    #[test]
    fn test_decoder_without_capture_keeps_nothing() {
        let mut decoder = ChunkDecoder::default();
        let chunk = decoder.accept(stdout("hello\n"));
        assert_eq!(chunk, Some(ExecChunk::Stdout("hello\n".into())));
        assert!(decoder.captured.is_empty());
    }

    #[test]
    fn test_decoder_capture_records_in_order() {
        let mut decoder = ChunkDecoder {
            capture: true,
            ..Default::default()
        };
        decoder.accept(stdout("one "));
        decoder.accept(LogOutput::StdErr {
            message: b"two ".to_vec().into(),
        });
        decoder.accept(LogOutput::Console {
            message: b"three".to_vec().into(),
        });
        assert_eq!(decoder.captured, ["one ", "two ", "three"]);
    }

    #[test]
    fn test_decoder_routes_stderr_and_skips_stdin() {
        let mut decoder = ChunkDecoder::default();
        let err = decoder.accept(LogOutput::StdErr {
            message: b"oops".to_vec().into(),
        });
        assert_eq!(err, Some(ExecChunk::Stderr("oops".into())));
        let echo = decoder.accept(LogOutput::StdIn {
            message: b"typed".to_vec().into(),
        });
        assert_eq!(echo, None);
    }

    #[test]
    fn test_decoder_is_lossy_on_invalid_utf8() {
        let mut decoder = ChunkDecoder::default();
        let chunk = decoder
            .accept(LogOutput::StdOut {
                message: vec![0x66, 0xff, 0x6f].into(),
            })
            .unwrap();
        assert_eq!(chunk.text(), "f\u{fffd}o");
    }

    /// Requires a running Docker daemon and a running container named `dtool-test`.
    #[tokio::test]
    #[ignore]
    async fn test_stream_exec_live() {
        let client = RuntimeClient::connect().unwrap();
        let mut stream = client
            .stream_exec("dtool-test", &["echo".into(), "hi".into()])
            .await
            .unwrap()
            .with_capture();
        while stream.next_chunk().await.unwrap().is_some() {}
        assert!(stream.captured().concat().contains("hi"));
        assert_eq!(stream.exit_code().await.unwrap(), 0);
    }
}
