//! # bump-version Error Types
//!
//! File: release/src/error.rs
//!
//! Every failure aborts the release where it happens. Nothing already
//! written or committed is rolled back.
//!
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No version matching `{pattern}` found in {}", path.display())]
    VersionNotFound { path: PathBuf, pattern: String },

    #[error("Invalid version '{0}' (expected MAJOR.MINOR.PATCH)")]
    InvalidVersion(String),

    /// A git step ran and exited unsuccessfully.
    #[error("Release step '{step}' failed with status {status}")]
    StepFailed { step: String, status: String },

    /// A git step could not be started at all.
    #[error("Failed to run release step '{step}'. Is git installed and in PATH?")]
    Spawn {
        step: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ReleaseError::VersionNotFound {
            path: PathBuf::from("cli/Cargo.toml"),
            pattern: "version".into(),
        };
        assert_eq!(
            err.to_string(),
            "No version matching `version` found in cli/Cargo.toml"
        );

        let err = ReleaseError::StepFailed {
            step: "git push".into(),
            status: "1".into(),
        };
        assert!(err.to_string().contains("'git push'"));
    }
}
