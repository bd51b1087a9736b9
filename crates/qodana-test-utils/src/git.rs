//! Git repository fixtures.

use std::fs;
use std::path::Path;
use std::process::Command;

fn run_git(path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "`git {args:?}` failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Initialises a git repository on branch `main` with `count` commits using
/// the `git` CLI.
///
/// Commit `i` (1-based) adds `file{i}.txt` containing `content {i}`.
/// Returns the commit hashes **oldest first**.
///
/// # Panics
/// Panics if any git operation fails.
pub fn real_git_repo_with_commits(path: &Path, count: usize) -> Vec<String> {
    run_git(path, &["init"]);
    run_git(path, &["config", "user.email", "test@test.com"]);
    run_git(path, &["config", "user.name", "Test User"]);
    run_git(path, &["config", "commit.gpgsign", "false"]);
    run_git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    (1..=count)
        .map(|i| {
            fs::write(path.join(format!("file{i}.txt")), format!("content {i}"))
                .unwrap_or_else(|e| panic!("failed to write file{i}.txt: {e}"));
            run_git(path, &["add", "."]);
            run_git(path, &["commit", "-m", &format!("Commit {i}")]);
            run_git(path, &["rev-parse", "HEAD"])
        })
        .collect()
}

/// Run an arbitrary git command in `path`, returning trimmed stdout.
///
/// # Panics
/// Panics if the command fails.
pub fn git(path: &Path, args: &[&str]) -> String {
    run_git(path, args)
}

/// Name of the branch HEAD points to, or `None` when detached.
///
/// # Panics
/// Panics if the repository cannot be opened.
pub fn head_branch(path: &Path) -> Option<String> {
    let repo = git2::Repository::open(path)
        .unwrap_or_else(|e| panic!("failed to open {}: {e}", path.display()));
    let head = repo.head().unwrap_or_else(|e| panic!("failed to read HEAD: {e}"));
    if head.is_branch() {
        head.shorthand().map(str::to_string)
    } else {
        None
    }
}

/// Full hash of the commit HEAD points to.
///
/// # Panics
/// Panics if the repository cannot be opened or HEAD is unborn.
pub fn head_revision(path: &Path) -> String {
    let repo = git2::Repository::open(path)
        .unwrap_or_else(|e| panic!("failed to open {}: {e}", path.display()));
    let commit = repo
        .head()
        .and_then(|h| h.peel_to_commit())
        .unwrap_or_else(|e| panic!("failed to resolve HEAD: {e}"));
    commit.id().to_string()
}
