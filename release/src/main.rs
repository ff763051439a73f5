//! # bump-version
//!
//! File: release/src/main.rs
//!
//! ## Overview
//!
//! CI release helper for dtool. It:
//!
//! 1. Reads the current version from `cli/src/version.rs`.
//! 2. Bumps the patch component.
//! 3. Rewrites the version in `cli/src/version.rs` and `cli/Cargo.toml`.
//! 4. Commits, tags `vX.Y.Z` and pushes (commits and tags included).
//! 5. Prints `Bumped version: OLD → NEW`.
//!
//! Any failure stops the run. Files written or steps completed before the
//! failure are left as they are.
//!
//! ```bash
//! bump-version                       # from the repository root
//! bump-version --dry-run             # show what would happen
//! bump-version --git-name me --git-email me@example.com
//! ```
//!
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

mod error;
mod git;
mod version;

use git::GitIdentity;
use version::VersionSite;

#[derive(Parser, Debug)]
#[command(
    name = "bump-version",
    about = "Bump dtool's patch version, then commit, tag and push"
)]
struct Args {
    /// Rust source file holding `pub const VERSION: &str = "X.Y.Z";`.
    #[arg(long, default_value = "cli/src/version.rs")]
    version_file: PathBuf,

    /// Cargo manifest whose package `version` is kept in sync.
    #[arg(long, default_value = "cli/Cargo.toml")]
    manifest: PathBuf,

    /// Print the new version and planned git steps without changing anything.
    #[arg(long)]
    dry_run: bool,

    /// Name used for the release commit.
    #[arg(long, default_value = "github-actions")]
    git_name: String,

    /// Email used for the release commit.
    #[arg(long, default_value = "github-actions@github.com")]
    git_email: String,

    /// Increase log verbosity (repeat for more).
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    debug!("Parsed arguments: {:?}", args);

    let current = version::read_version(&args.version_file, VersionSite::SourceConst)
        .context("Failed to read the current version")?;
    let next = current.bump_patch()?;
    info!("Bumping {} -> {}", current, next);

    let identity = GitIdentity {
        name: args.git_name,
        email: args.git_email,
    };
    let files = vec![args.manifest.clone(), args.version_file.clone()];
    let steps = git::release_steps(&next.to_string(), &identity, &files);

    if args.dry_run {
        println!("Would bump version: {current} → {next}");
        println!("Would update:");
        for file in &files {
            println!("  {}", file.display());
        }
        println!("Would run:");
        for step in &steps {
            println!("  {step}");
        }
        return Ok(());
    }

    version::write_version(&args.version_file, VersionSite::SourceConst, &next)?;
    version::write_version(&args.manifest, VersionSite::Manifest, &next)?;
    git::run_steps(&steps, std::path::Path::new("."))?;

    println!("Bumped version: {current} → {next}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["bump-version"]).unwrap();
        assert_eq!(args.version_file, PathBuf::from("cli/src/version.rs"));
        assert_eq!(args.manifest, PathBuf::from("cli/Cargo.toml"));
        assert_eq!(args.git_name, "github-actions");
        assert_eq!(args.git_email, "github-actions@github.com");
        assert!(!args.dry_run);
    }
}
