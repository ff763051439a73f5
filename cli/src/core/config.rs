//! # dtool Configuration
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! Loads the optional user configuration file (`config.toml`) that supplies
//! defaults for the engine CLI used by `dtool shell`, the shell it starts, and
//! the default `ps` flags.
//!
//! ## Lookup order
//!
//! 1. An explicit path from `--config` / `DTOOL_CONFIG`. It must exist.
//! 2. `<user config dir>/dtool/config.toml` (via `directories::ProjectDirs`).
//! 3. Built-in defaults when neither is present.
//!
//! ## Example
//!
//! ```toml
//! [engine]
//! cli = "docker"
//!
//! [shell]
//! default = "/bin/bash"
//!
//! [ps]
//! all = true
//! ```
//!
use crate::core::error::{DtoolError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Root configuration structure.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub shell: ShellConfig,
    #[serde(default)]
    pub ps: PsDefaults,
}

/// How the container engine's own CLI is invoked for the interactive shell.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Engine CLI binary (name on PATH or a path; `~` is expanded).
    #[serde(default = "default_engine_cli")]
    pub cli: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cli: default_engine_cli(),
        }
    }
}

/// Settings for `dtool shell`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ShellConfig {
    /// Shell started inside the container when `--shell` is not given.
    #[serde(default = "default_shell")]
    pub default: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            default: default_shell(),
        }
    }
}

/// Default flag values for `dtool ps`.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PsDefaults {
    #[serde(default)]
    pub all: bool,
    #[serde(default)]
    pub regex: bool,
}

fn default_engine_cli() -> String {
    "docker".to_string()
}
fn default_shell() -> String {
    "/bin/sh".to_string()
}

const CONFIG_FILENAME: &str = "config.toml";

/// Loads, expands and validates the configuration.
///
/// # Arguments
///
/// * `explicit` - Path given via `--config` / `DTOOL_CONFIG`, if any.
///
/// # Errors
///
/// Fails when an explicit path does not exist, when a file cannot be read or
/// parsed, or when validation rejects a value (`DtoolError::Config`).
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(anyhow!(DtoolError::Config(format!(
                    "Config file '{}' does not exist.",
                    path.display()
                ))));
            }
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => load_user_config()?.unwrap_or_default(),
    };
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dtool").map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

fn load_user_config() -> Result<Option<Config>> {
    match user_config_path() {
        Some(path) if path.exists() => {
            info!("Loading user configuration from: {}", path.display());
            load_config_from_path(&path).map(Some)
        }
        Some(path) => {
            debug!("User configuration file not found at {}", path.display());
            Ok(None)
        }
        None => {
            debug!("Could not determine user config directory.");
            Ok(None)
        }
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn expand_config_paths(config: &mut Config) {
    config.engine.cli = shellexpand::tilde(&config.engine.cli).into_owned();
    debug!("Expanded engine CLI: {}", config.engine.cli);
}

fn validate_config(config: &Config) -> Result<()> {
    if config.engine.cli.trim().is_empty() {
        return Err(anyhow!(DtoolError::Config(
            "engine.cli must not be empty.".to_string()
        )));
    }
    if config.shell.default.trim().is_empty() {
        return Err(anyhow!(DtoolError::Config(
            "shell.default must not be empty.".to_string()
        )));
    }
    Ok(())
}
