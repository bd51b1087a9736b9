//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Resolve the effective Qodana configuration of a project
#[derive(Parser, Debug)]
#[command(name = "qodana-config")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run one resolution pass on the working tree as it is
    Resolve {
        #[command(flatten)]
        args: ResolveArgs,
    },

    /// Resolve the configuration of every revision, oldest first
    ///
    /// Each revision is checked out with force and cleaned before
    /// resolution; the original branch is checked out again afterwards.
    History {
        /// Start from this revision instead of the first one
        #[arg(long)]
        commit: Option<String>,

        #[command(flatten)]
        args: ResolveArgs,
    },

    /// Resolve with HEAD soft-reset to a revision, then reset back
    Stage {
        /// Revision to stage
        #[arg(long)]
        commit: String,

        #[command(flatten)]
        args: ResolveArgs,
    },

    /// List the revisions a history run would visit
    Revisions {
        /// Project directory
        #[arg(short, long, env = "QODANA_PROJECT_DIR", default_value = ".")]
        project_dir: PathBuf,
    },
}

/// Inputs shared by every command that resolves configuration
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ResolveArgs {
    /// Project directory
    #[arg(short, long, env = "QODANA_PROJECT_DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Local configuration file, relative to the project directory.
    /// Defaults to qodana.yaml or qodana.yml
    #[arg(long = "config")]
    pub local_config: Option<String>,

    /// Java launcher used to run the configuration resolver
    #[arg(long, env = "QODANA_JRE")]
    pub jre: Option<PathBuf>,

    /// Scratch directory for the resolver and its output
    #[arg(long, env = "QODANA_SYSTEM_DIR")]
    pub system_dir: PathBuf,

    /// Path to config-loader-cli.jar
    #[arg(long, env = "QODANA_CONFIG_LOADER_CLI")]
    pub config_loader_cli: PathBuf,

    /// File with global configurations
    #[arg(long, env = "QODANA_GLOBAL_CONFIGS_FILE")]
    pub global_configs_file: Option<PathBuf>,

    /// Id of the global configuration to apply
    #[arg(long, env = "QODANA_GLOBAL_CONFIG_ID")]
    pub global_config_id: Option<String>,

    /// Directory for per-tool command logs
    #[arg(long, env = "QODANA_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}
