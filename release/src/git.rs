//! # Release Git Steps
//!
//! File: release/src/git.rs
//!
//! The commit/tag/push sequence that follows a version bump. Steps run in
//! order with inherited stdio; the first one that fails stops the release.
//!
use crate::error::ReleaseError;
use std::{
    fmt,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};
use tracing::{error, info};

/// The identity commits are made under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitIdentity {
    pub name: String,
    pub email: String,
}

/// One `git` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitStep {
    /// Short label used in logs and errors, e.g. `git push --tags`.
    pub label: String,
    pub args: Vec<String>,
}

impl GitStep {
    fn new(label: &str, args: &[&str]) -> Self {
        Self {
            label: format!("git {label}"),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl fmt::Display for GitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "git {}", self.args.join(" "))
    }
}

/// Builds the release sequence for `version`, staging `files`.
pub fn release_steps(version: &str, identity: &GitIdentity, files: &[PathBuf]) -> Vec<GitStep> {
    let mut add = vec!["add".to_string()];
    add.extend(files.iter().map(|p| p.display().to_string()));
    let message = format!("chore: bump version to {version} [CI]");
    let tag = format!("v{version}");

    vec![
        GitStep::new("config user.name", &["config", "user.name", identity.name.as_str()]),
        GitStep::new("config user.email", &["config", "user.email", identity.email.as_str()]),
        GitStep {
            label: "git add".to_string(),
            args: add,
        },
        GitStep::new("commit", &["commit", "-m", message.as_str()]),
        GitStep::new("tag", &["tag", tag.as_str()]),
        GitStep::new("push", &["push"]),
        GitStep::new("push --tags", &["push", "--tags"]),
    ]
}

/// Runs `steps` in order from `cwd`.
///
/// # Errors
///
/// * `ReleaseError::Spawn` - git could not be started.
/// * `ReleaseError::StepFailed` - a step exited non-zero. Later steps are not run.
pub fn run_steps(steps: &[GitStep], cwd: &Path) -> Result<(), ReleaseError> {
    for step in steps {
        info!("Running: {}", step);
        let status = Command::new("git")
            .args(&step.args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ReleaseError::Spawn {
                step: step.label.clone(),
                source,
            })?;

        if !status.success() {
            let code = status.code().map_or("?".to_string(), |c| c.to_string());
            error!("'{}' failed with exit code {}", step.label, code);
            return Err(ReleaseError::StepFailed {
                step: step.label.clone(),
                status: code,
            });
        }
    }
    Ok(())
}
