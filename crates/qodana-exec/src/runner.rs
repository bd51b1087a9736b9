//! Blocking subprocess runner with per-tool log files

use std::ffi::OsStr;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use chrono::Utc;

use crate::error::{ExecError, Result};

/// Captured result of a finished subprocess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Captured standard output (lossy UTF-8)
    pub stdout: String,
    /// Captured standard error (lossy UTF-8)
    pub stderr: String,
    /// Exit code, `-1` when the process was terminated by a signal
    pub code: i32,
}

impl CommandOutput {
    /// Whether the process exited with code 0.
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Runs external tools to completion, one at a time.
///
/// There is no timeout: the calling thread blocks until the child exits.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    log_dir: Option<PathBuf>,
}

impl ProcessRunner {
    /// Runner that only logs through `tracing`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner that also appends every invocation to `<log_dir>/<tool>.log`.
    pub fn with_log_dir(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: Some(log_dir.into()),
        }
    }

    /// Configured log directory, if any.
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }

    /// Run `program args...` in `cwd` and capture its output.
    ///
    /// A nonzero exit code is not an error here; callers decide what it
    /// means through [`CommandOutput::code`].
    pub fn run<S: AsRef<OsStr>>(
        &self,
        cwd: Option<&Path>,
        tool: &str,
        program: impl AsRef<OsStr>,
        args: &[S],
    ) -> Result<CommandOutput> {
        let program = program.as_ref();
        let command_line = render(program, args);

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        tracing::debug!(tool, command = %command_line, cwd = ?cwd, "Executing command");

        let output = cmd.output().map_err(|source| ExecError::Launch {
            program: program.to_string_lossy().to_string(),
            source,
        })?;

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            code: output.status.code().unwrap_or(-1),
        };

        if !result.stderr.is_empty() {
            tracing::debug!(tool, stderr = %result.stderr.trim_end(), "Command wrote to stderr");
        }
        if !result.success() {
            tracing::warn!(
                tool,
                command = %command_line,
                code = result.code,
                "Command exited with nonzero code"
            );
        }

        self.append_log(tool, &command_line, &result)?;
        Ok(result)
    }

    fn append_log(&self, tool: &str, command_line: &str, output: &CommandOutput) -> Result<()> {
        let Some(dir) = &self.log_dir else {
            return Ok(());
        };
        let path = dir.join(format!("{tool}.log"));
        let log_err = |source: std::io::Error| ExecError::LogFile {
            tool: tool.to_string(),
            path: path.clone(),
            source,
        };

        fs::create_dir_all(dir).map_err(log_err)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(log_err)?;

        let mut entry = format!(
            "[{}] Executing command: {}\n",
            Utc::now().to_rfc3339(),
            command_line
        );
        entry.push_str(&output.stdout);
        if !output.stdout.is_empty() && !output.stdout.ends_with('\n') {
            entry.push('\n');
        }
        if !output.stderr.is_empty() {
            entry.push_str("ERROR: ");
            entry.push_str(&output.stderr);
            if !output.stderr.ends_with('\n') {
                entry.push('\n');
            }
        }
        entry.push_str(&format!("exit code: {}\n", output.code));

        file.write_all(entry.as_bytes()).map_err(log_err)
    }
}

fn render<S: AsRef<OsStr>>(program: &OsStr, args: &[S]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(AsRef::as_ref))
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
