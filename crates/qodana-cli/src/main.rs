//! Qodana configuration CLI
//!
//! Resolves the effective Qodana configuration of a project, optionally for
//! every revision of its history.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use qodana_git::Interrupt;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = execute_command(cli.command) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

/// `DEBUG` with `--verbose`; otherwise `RUST_LOG`, falling back to `WARN`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("{}: failed to set tracing subscriber: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");
}

/// Stop a traversal at the next revision boundary on Ctrl-C.
fn install_interrupt() -> Result<Interrupt> {
    let interrupt = Interrupt::new();
    let handle = interrupt.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nReceived interrupt, stopping after the current revision...");
        handle.trigger();
    })?;
    Ok(interrupt)
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Resolve { args } => commands::run_resolve(&args),
        Commands::History { commit, args } => {
            let interrupt = install_interrupt()?;
            commands::run_history(&args, commit.as_deref(), interrupt)
        }
        Commands::Stage { commit, args } => commands::run_stage(&args, &commit),
        Commands::Revisions { project_dir } => commands::run_revisions(&project_dir),
    }
}
