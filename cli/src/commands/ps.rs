//! # dtool `ps` Command
//!
//! File: cli/src/commands/ps.rs
//!
//! ## Overview
//!
//! Lists containers as a colour-coded table, optionally narrowed to those
//! matching a name or ID.
//!
//! ## Workflow
//!
//! 1. Build a `FilterSpec` from the arguments, with `config.toml`'s `[ps]`
//!    section supplying defaults for `--all` / `--regex`.
//! 2. List containers (running only unless `--all`).
//! 3. Apply the filter when a token was given.
//! 4. Print the table, or the "No containers found." notice.
//!
//! ## Usage
//!
//! ```bash
//! dtool ps                 # running containers
//! dtool ps --all           # include stopped ones
//! dtool ps my-container    # exact name
//! dtool ps e3f1d2          # ID prefix
//! dtool ps -r '^api-'      # case-insensitive regex over names and IDs
//! ```
//!
use crate::{
    common::{
        docker::RuntimeClient,
        filter::{self, FilterSpec, MatchMode},
        ui::table,
    },
    core::{config::PsDefaults, error::Result},
};
use clap::Parser;
use tracing::{debug, info};

/// # `ps` Arguments (`PsArgs`)
#[derive(Parser, Debug)]
#[command(
    about = "📋 List containers",
    after_help = "Examples:\n  dtool ps\n  dtool ps --all\n  dtool ps my-container\n  dtool ps e3f1d2"
)]
pub struct PsArgs {
    /// Container name or ID to filter.
    container: Option<String>,

    /// Show all containers (default shows just running).
    #[arg(long, short)]
    all: bool,

    /// Use regex match.
    #[arg(long, short)]
    regex: bool,
}

impl PsArgs {
    /// Flags switch behaviour on; configuration decides the default.
    fn filter_spec(&self, defaults: &PsDefaults) -> FilterSpec {
        let mode = if self.regex || defaults.regex {
            MatchMode::Regex
        } else {
            MatchMode::Exact
        };
        FilterSpec {
            token: self.container.clone(),
            mode,
            include_stopped: self.all || defaults.all,
        }
    }
}

/// Handles `dtool ps`.
///
/// # Errors
///
/// * `DtoolError::InvalidFilterPattern` - `--regex` with a pattern that does not compile.
/// * `DtoolError::RuntimeUnavailable` / `DtoolError::DockerApi` - listing failed.
pub async fn handle_ps(args: PsArgs, client: &RuntimeClient, defaults: &PsDefaults) -> Result<()> {
    let spec = args.filter_spec(defaults);
    info!(
        "Handling ps (Filter: {:?}, Mode: {:?}, All: {})",
        spec.token, spec.mode, spec.include_stopped
    );

    let records = client.list_containers(spec.include_stopped).await?;
    let matching = filter::filter_containers(records, &spec)?;
    debug!("{} container(s) after filtering.", matching.len());

    print!("{}", table::render(&matching));
    Ok(())
}
