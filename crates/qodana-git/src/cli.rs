//! `git` subprocess implementation of [`VersionControl`]

use std::path::{Path, PathBuf};

use qodana_exec::{CommandOutput, ProcessRunner};

use crate::provider::VersionControl;
use crate::{Error, Result};

const TOOL: &str = "git";

/// Runs `git` commands inside one working tree.
#[derive(Debug, Clone)]
pub struct GitCli {
    cwd: PathBuf,
    runner: ProcessRunner,
}

impl GitCli {
    /// Operate on the working tree at `cwd`, logging through `tracing` only.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self::with_runner(cwd, ProcessRunner::new())
    }

    /// Operate on `cwd` using `runner`, which may log to `<log_dir>/git.log`.
    pub fn with_runner(cwd: impl Into<PathBuf>, runner: ProcessRunner) -> Self {
        Self {
            cwd: cwd.into(),
            runner,
        }
    }

    /// Working tree this instance operates on.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Absolute path of the repository root (`rev-parse --show-toplevel`).
    pub fn root(&self) -> Result<String> {
        self.stdout(&["rev-parse", "--show-toplevel"])
    }

    /// URL of the `origin` remote.
    pub fn remote_url(&self) -> Result<String> {
        self.stdout(&["remote", "get-url", "origin"])
    }

    /// Commit hashes newest first, as `git log` prints them.
    ///
    /// `max_count = 0` means no limit.
    pub fn log(&self, format: &str, max_count: usize) -> Result<Vec<String>> {
        let pretty = format!("--pretty=format:{format}");
        let mut args = vec!["log".to_string(), pretty];
        if max_count > 0 {
            args.push(format!("--max-count={max_count}"));
        }
        let output = self.run(args.as_slice())?;
        if !output.success() {
            if output.stderr.contains("does not have any commits") {
                return Err(Error::EmptyHistory);
            }
            return Err(failed(args.as_slice(), output));
        }
        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn run<S: AsRef<str>>(&self, args: &[S]) -> Result<CommandOutput> {
        let args: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();
        let output = self.runner.run(Some(&self.cwd), TOOL, "git", args.as_slice())?;
        if !output.stderr.is_empty() {
            tracing::debug!(
                command = %args.join(" "),
                stderr = %output.stderr.trim_end(),
                "git stderr"
            );
        }
        Ok(output)
    }

    fn check<S: AsRef<str>>(&self, args: &[S]) -> Result<CommandOutput> {
        let output = self.run(args)?;
        if output.success() {
            Ok(output)
        } else {
            tracing::error!(
                command = %join(args),
                code = output.code,
                "Error executing git command"
            );
            Err(failed(args, output))
        }
    }

    fn stdout<S: AsRef<str>>(&self, args: &[S]) -> Result<String> {
        Ok(self.check(args)?.stdout.trim().to_string())
    }
}

impl VersionControl for GitCli {
    fn revisions(&self) -> Result<Vec<String>> {
        let mut revisions = self.log("%H", 0)?;
        revisions.reverse();
        Ok(revisions)
    }

    fn checkout(&self, target: &str, force: bool) -> Result<()> {
        let target = revision_arg(target)?;
        if force {
            self.check(&["checkout", "-f", target])?;
        } else {
            self.check(&["checkout", target])?;
        }
        Ok(())
    }

    fn reset(&self, revision: &str) -> Result<()> {
        self.check(&["reset", "--soft", revision_arg(revision)?])?;
        Ok(())
    }

    fn reset_back(&self) -> Result<()> {
        self.check(&["reset", "HEAD@{1}"])?;
        Ok(())
    }

    fn clean(&self) -> Result<()> {
        self.check(&["clean", "-fdx"])?;
        Ok(())
    }

    fn branch(&self) -> Result<String> {
        self.stdout(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    fn current_revision(&self) -> Result<String> {
        self.stdout(&["rev-parse", "HEAD"])
    }

    fn revision_exists(&self, revision: &str) -> bool {
        let Ok(revision) = revision_arg(revision) else {
            tracing::warn!(revision, "Refusing to probe a revision that looks like an option");
            return false;
        };
        match self.run(&["show", "--no-patch", revision]) {
            Ok(output) => revision_found(revision, &output),
            Err(e) => {
                tracing::warn!(revision, error = %e, "Could not probe revision");
                false
            }
        }
    }

    fn resolve_revision(&self, revision: &str) -> Result<String> {
        let commit = format!("{}^{{commit}}", revision_arg(revision)?);
        let output = self.run(&["rev-parse", "--verify", "--quiet", commit.as_str()])?;
        if !output.success() {
            return Err(Error::RevisionNotFound {
                revision: revision.to_string(),
            });
        }
        Ok(output.stdout.trim().to_string())
    }
}

/// Reject tokens git would parse as an option rather than a revision.
fn revision_arg(revision: &str) -> Result<&str> {
    if revision.starts_with('-') {
        return Err(Error::InvalidRevision {
            revision: revision.to_string(),
        });
    }
    Ok(revision)
}

/// Interpret the output of `git show --no-patch <revision>`.
///
/// Git reports unknown revisions on stderr, either with a `fatal:` prefix
/// or by echoing the token back; both count as "does not exist".
pub(crate) fn revision_found(revision: &str, output: &CommandOutput) -> bool {
    output.success() && !output.stderr.contains("fatal:") && !output.stderr.contains(revision)
}

fn join<S: AsRef<str>>(args: &[S]) -> String {
    args.iter().map(|a| a.as_ref()).collect::<Vec<_>>().join(" ")
}

fn failed<S: AsRef<str>>(args: &[S], output: CommandOutput) -> Error {
    Error::CommandFailed {
        command: join(args),
        code: output.code,
        stderr: output.stderr.trim().to_string(),
    }
}
