//! # dtool Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout dtool. It follows the
//! usual split between a typed error enum and a flexible result alias:
//!
//! - `DtoolError`: a `thiserror` enum for the failures callers need to tell apart
//!   (daemon down, bad filter pattern, missing or stopped container, ...).
//! - `Result<T>`: an alias for `anyhow::Result<T>` used by handlers and the
//!   Docker adapter so context can be attached while propagating.
//!
//! Callers that need to react to a specific failure downcast:
//!
//! ```rust
//! match result {
//!     Err(e) if matches!(e.downcast_ref::<DtoolError>(), Some(DtoolError::DaemonUnavailable)) => {
//!         // show the diagnostic panel
//!     }
//!     other => other?,
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for dtool.
#[derive(Error, Debug)]
pub enum DtoolError {
    #[error("Docker daemon is not running or not reachable.")]
    DaemonUnavailable,

    /// The daemon passed the health check but a later call could not reach it.
    #[error("Docker daemon became unavailable: {source}")]
    RuntimeUnavailable {
        #[source]
        source: bollard::errors::Error,
    },

    #[error("Docker API interaction failed: {source}")]
    DockerApi {
        #[from]
        source: bollard::errors::Error,
    },

    #[error("Invalid filter pattern '{token}': {source}")]
    InvalidFilterPattern {
        token: String,
        #[source]
        source: regex::Error,
    },

    #[error("Container '{name}' not found.")]
    ContainerNotFound { name: String },

    #[error("Container '{name}' is not running (status: {status}).")]
    ContainerNotRunning { name: String, status: String },

    #[error("Command in container '{container}' exited with code {code}.")]
    ExecFailed { container: String, code: i64 },

    #[error("Shell session in container '{container}' exited with code {code}.")]
    ShellExited { container: String, code: i32 },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DtoolError {
    /// Normalises a `bollard` error: daemon responses keep their status and
    /// message, anything that never reached the daemon means it went away.
    pub fn from_bollard(source: bollard::errors::Error) -> Self {
        match source {
            bollard::errors::Error::DockerResponseServerError { .. } => {
                DtoolError::DockerApi { source }
            }
            _ => DtoolError::RuntimeUnavailable { source },
        }
    }

    /// Process exit code to use when this error terminates the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Mirror the remote command's status where it fits in an i32.
            DtoolError::ExecFailed { code, .. } => i32::try_from(*code).unwrap_or(1),
            DtoolError::ShellExited { code, .. } => *code,
            _ => 1,
        }
    }
}

/// Type alias for Result using anyhow::Error.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let not_found = DtoolError::ContainerNotFound {
            name: "web".into(),
        };
        assert_eq!(not_found.to_string(), "Container 'web' not found.");

        let not_running = DtoolError::ContainerNotRunning {
            name: "db".into(),
            status: "exited".into(),
        };
        assert_eq!(
            not_running.to_string(),
            "Container 'db' is not running (status: exited)."
        );

        let config_err = DtoolError::Config("engine.cli must not be empty".into());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: engine.cli must not be empty"
        );
    }

    #[test]
    fn test_invalid_pattern_names_token() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = DtoolError::InvalidFilterPattern {
            token: "(".into(),
            source,
        };
        assert!(err.to_string().starts_with("Invalid filter pattern '('"));
    }

    #[test]
    fn test_from_bollard_keeps_server_errors() {
        let server = bollard::errors::Error::DockerResponseServerError {
            status_code: 500,
            message: "boom".into(),
        };
        assert!(matches!(
            DtoolError::from_bollard(server),
            DtoolError::DockerApi { .. }
        ));

        let transport = bollard::errors::Error::RequestTimeoutError;
        assert!(matches!(
            DtoolError::from_bollard(transport),
            DtoolError::RuntimeUnavailable { .. }
        ));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(DtoolError::DaemonUnavailable.exit_code(), 1);
        let exec = DtoolError::ExecFailed {
            container: "web".into(),
            code: 3,
        };
        assert_eq!(exec.exit_code(), 3);
        let shell = DtoolError::ShellExited {
            container: "web".into(),
            code: 130,
        };
        assert_eq!(shell.exit_code(), 130);
    }
}
