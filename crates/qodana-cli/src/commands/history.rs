//! Resolution across revisions

use colored::Colorize;

use qodana_git::{GitCli, Interrupt, RevisionWalker};

use super::resolve::{client, print_config, resolve_options, runner};
use crate::cli::ResolveArgs;
use crate::error::Result;

fn short(revision: &str) -> &str {
    revision.get(..8).unwrap_or(revision)
}

/// Run the history command.
///
/// Resolves every revision from `commit` (or the first one) onwards. The
/// first failure stops the run once the original branch is back.
pub fn run_history(args: &ResolveArgs, commit: Option<&str>, interrupt: Interrupt) -> Result<()> {
    let git = GitCli::with_runner(&args.project_dir, runner(args));
    let walker = RevisionWalker::new(&git).with_interrupt(interrupt);
    let revisions = walker.full_history(commit)?;

    let client = client(args);
    let options = resolve_options(args);
    let configs = walker.walk(&revisions, |revision| {
        println!("{} Resolving {}", "=>".blue().bold(), short(revision).cyan());
        client.resolve(&options)
    })?;

    println!(
        "{} Resolved {} revision(s)",
        "OK".green().bold(),
        configs.len()
    );
    Ok(())
}

/// Run the stage command.
pub fn run_stage(args: &ResolveArgs, commit: &str) -> Result<()> {
    let git = GitCli::with_runner(&args.project_dir, runner(args));
    let walker = RevisionWalker::new(&git);

    let client = client(args);
    let options = resolve_options(args);
    let config = walker.staged(commit, |revision| {
        println!("{} Resolving staged {}", "=>".blue().bold(), short(revision).cyan());
        client.resolve(&options)
    })?;

    print_config(&config);
    Ok(())
}
