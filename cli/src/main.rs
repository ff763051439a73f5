//! # dtool Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point for the `dtool` CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up logging based on `--verbose`
//! - Loading the configuration
//! - The daemon-health gate and dispatch to the command handlers
//! - Turning errors into a message on stderr and an exit code
//!
//! ## Flow
//!
//! 1. Parse arguments; `--version` / `--help` exit here.
//! 2. Configure logging (stderr, so stdout only carries command output).
//!    `completions` prints its script and exits here.
//! 3. Load `config.toml`.
//! 4. Connect and ping the daemon; exit 1 with a panel if it is down.
//! 5. Run the command handler.
//!
//! ```bash
//! dtool ps --all
//! dtool --verbose --verbose ps web
//! ```
//!
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Subcommand handlers (ps, shell, exec)
mod common; // Docker adapter, filtering, terminal UI
mod core; // Errors and configuration
mod version;

use crate::common::{docker::RuntimeClient, ui::panel};
use crate::core::{
    config,
    error::{DtoolError, Result},
};

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "dtool",
    about = "🐳 Docker operations made simple",
    long_about = "🐳 Docker Tool - Smart Docker container management\n\n\
                  Run 'dtool COMMAND --help' for more information on a command.",
    after_help = "Made with ❤️ for developers who hate long Docker commands",
    disable_version_flag = true,
    arg_required_else_help = true
)]
struct Cli {
    /// Show version and exit.
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// Increase log verbosity (repeat for more).
    #[arg(long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a config file (defaults to the user config directory).
    #[arg(long, global = true, env = "DTOOL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// All available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    Ps(commands::ps::PsArgs),
    Shell(commands::shell::ShellArgs),
    Exec(commands::exec::ExecArgs),
    Completions(commands::completions::CompletionsArgs),
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
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

/// Loads the configuration, then passes the daemon gate.
async fn prepare(config_path: Option<&Path>) -> Result<(config::Config, RuntimeClient)> {
    let cfg = config::load_config(config_path)?;
    let client = commands::connect_checked().await?;
    Ok((cfg, client))
}

async fn run(command: Commands, config_path: Option<&Path>) -> Result<()> {
    match command {
        Commands::Completions(args) => {
            commands::completions::handle_completions(args, &mut Cli::command())
        }
        Commands::Ps(args) => {
            let (cfg, client) = prepare(config_path).await?;
            commands::ps::handle_ps(args, &client, &cfg.ps).await
        }
        Commands::Shell(args) => {
            let (cfg, client) = prepare(config_path).await?;
            commands::shell::handle_shell(args, &client, &cfg).await
        }
        Commands::Exec(args) => {
            let (_, client) = prepare(config_path).await?;
            commands::exec::handle_exec(args, &client).await
        }
    }
}

/// Prints `e` for the user and returns the exit code to use.
fn report_error(e: &anyhow::Error) -> i32 {
    match e.downcast_ref::<DtoolError>() {
        Some(DtoolError::DaemonUnavailable) => {
            eprint!("{}", panel::daemon_unavailable());
            1
        }
        // The shell already showed whatever went wrong.
        Some(err @ DtoolError::ShellExited { .. }) => err.exit_code(),
        Some(err) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            err.exit_code()
        }
        None => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            1
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if cli.version {
        println!("{} version {}", "Docker Tool".blue().bold(), version::VERSION);
        return Ok(());
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if let Err(e) = run(command, cli.config.as_deref()).await {
        tracing::debug!("Command execution failed: {:?}", e);
        std::process::exit(report_error(&e));
    }

    Ok(())
}
