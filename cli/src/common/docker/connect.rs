//! # dtool Docker Connection
//!
//! File: cli/src/common/docker/connect.rs
//!
//! ## Overview
//!
//! Defines `RuntimeClient`, the single value through which dtool talks to the
//! Docker daemon. It is created once per invocation in `main` and passed by
//! reference to the command handlers; there is no process-wide client.
//!
//! The other adapter modules (`state`, `interaction`) add their own
//! `impl RuntimeClient` blocks.
//!
//! ```rust
//! let client = RuntimeClient::connect()?;
//! if client.daemon_is_running().await {
//!     let records = client.list_containers(false).await?;
//! }
//! ```
//!
use crate::core::error::{DtoolError, Result};
use anyhow::{anyhow, Context};
use bollard::Docker;
use tracing::{debug, instrument};

/// Thin wrapper around a `bollard::Docker` connection.
#[derive(Debug, Clone)]
pub struct RuntimeClient {
    pub(super) docker: Docker,
}

impl RuntimeClient {
    /// Connects to the local Docker daemon using `bollard`'s defaults.
    ///
    /// Honours `DOCKER_HOST`; otherwise uses the platform socket
    /// (`/var/run/docker.sock` on Unix, the named pipe on Windows).
    /// Building the client does not contact the daemon yet.
    ///
    /// # Errors
    ///
    /// Returns `DtoolError::DockerApi` if the connection settings are unusable
    /// (e.g. a malformed `DOCKER_HOST`).
    #[instrument]
    pub fn connect() -> Result<Self> {
        let docker = Docker::connect_with_local_defaults()
            .map_err(|e| anyhow!(DtoolError::DockerApi { source: e }))
            .context("Failed to connect to Docker daemon. Is it running and accessible?")?;
        Ok(Self { docker })
    }

    /// Pings the daemon. Never fails: any error collapses to `false`.
    #[instrument(skip(self))]
    pub async fn daemon_is_running(&self) -> bool {
        match self.docker.ping().await {
            Ok(reply) => {
                debug!("Docker daemon answered ping: {}", reply);
                true
            }
            Err(e) => {
                debug!("Docker daemon ping failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Requires a running Docker daemon. Run with `cargo test -- --ignored`.
    #[tokio::test]
    #[ignore]
    async fn test_connect_and_ping() {
        let client = RuntimeClient::connect().expect("connect");
        assert!(client.daemon_is_running().await);
    }
}
