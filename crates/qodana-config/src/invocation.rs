//! Building the resolver's command line
//!
//! The argument order is fixed:
//!
//! ```text
//! <runtime> -jar <artifact> --effective-config-out-dir <dir>
//!     [--local-qodana-yaml <file>] [--global-configs-file <file>] [--global-config-id <id>]
//! ```
//!
//! Every path argument is absolute and is the only kind of argument that
//! gets shell-quoted when the command line is rendered.

use qodana_fs::{NormalizedPath, file_exists};

use crate::{Error, Result};

pub const JAR_FLAG: &str = "-jar";
pub const OUT_DIR_FLAG: &str = "--effective-config-out-dir";
pub const LOCAL_CONFIG_FLAG: &str = "--local-qodana-yaml";
pub const GLOBAL_CONFIGS_FILE_FLAG: &str = "--global-configs-file";
pub const GLOBAL_CONFIG_ID_FLAG: &str = "--global-config-id";

/// Quoting rules of the shell a rendered command line is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// Single quotes around paths containing whitespace
    Posix,
    /// Double quotes around every path
    Windows,
}

impl QuoteStyle {
    /// Style of the platform this binary was built for.
    pub fn native() -> Self {
        if cfg!(windows) { Self::Windows } else { Self::Posix }
    }

    fn quote_path(&self, path: &str) -> String {
        match self {
            Self::Windows => format!("\"{path}\""),
            Self::Posix if path.chars().any(char::is_whitespace) => {
                format!("'{}'", path.replace('\'', r"'\''"))
            }
            Self::Posix => path.to_string(),
        }
    }

    /// The runtime launcher is only quoted when it has to be.
    fn quote_program(&self, path: &str) -> String {
        if path.chars().any(char::is_whitespace) {
            match self {
                Self::Windows => format!("\"{path}\""),
                Self::Posix => self.quote_path(path),
            }
        } else {
            path.to_string()
        }
    }
}

/// One argument of a resolver invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationArg {
    /// A fixed flag or marker
    Flag(&'static str),
    /// An absolute filesystem path
    Path(NormalizedPath),
    /// An opaque value passed through as-is
    Value(String),
}

impl InvocationArg {
    /// The argument as handed to the process, without quoting.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Flag(flag) => *flag,
            Self::Path(path) => path.as_str(),
            Self::Value(value) => value.as_str(),
        }
    }

    pub fn needs_quoting(&self) -> bool {
        matches!(self, Self::Path(_))
    }

    /// The argument as it appears in a rendered command line.
    pub fn quoted(&self, style: QuoteStyle) -> String {
        match self {
            Self::Path(path) => style.quote_path(path.as_str()),
            other => other.as_str().to_string(),
        }
    }
}

/// A fully built resolver invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: NormalizedPath,
    args: Vec<InvocationArg>,
    output_dir: NormalizedPath,
}

impl Invocation {
    /// The runtime launcher.
    pub fn program(&self) -> &NormalizedPath {
        &self.program
    }

    pub fn args(&self) -> &[InvocationArg] {
        &self.args
    }

    /// Absolute directory the resolver writes its output files to.
    pub fn output_dir(&self) -> &NormalizedPath {
        &self.output_dir
    }

    /// Unquoted argument strings, for spawning the process directly.
    pub fn raw_args(&self) -> Vec<String> {
        self.args.iter().map(|a| a.as_str().to_string()).collect()
    }

    /// Arguments quoted for `style`, program excluded.
    pub fn quoted_args(&self, style: QuoteStyle) -> Vec<String> {
        self.args.iter().map(|a| a.quoted(style)).collect()
    }

    /// Value following `flag`, if the flag is present.
    pub fn flag_value(&self, flag: &str) -> Option<&InvocationArg> {
        let idx = self
            .args
            .iter()
            .position(|a| matches!(a, InvocationArg::Flag(f) if *f == flag))?;
        self.args.get(idx + 1)
    }

    /// The whole command line, quoted for `style`.
    pub fn command_line(&self, style: QuoteStyle) -> String {
        std::iter::once(style.quote_program(self.program.as_str()))
            .chain(self.quoted_args(style))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.command_line(QuoteStyle::native()))
    }
}

/// Collects the inputs of a resolver invocation and validates them.
///
/// Empty strings are treated the same as absent values.
#[derive(Debug, Clone)]
pub struct InvocationBuilder {
    runtime: Option<NormalizedPath>,
    artifact: Option<NormalizedPath>,
    output_dir: NormalizedPath,
    local_config: Option<NormalizedPath>,
    global_configs_file: Option<NormalizedPath>,
    global_config_id: Option<String>,
}

impl InvocationBuilder {
    pub fn new(output_dir: NormalizedPath) -> Self {
        Self {
            runtime: None,
            artifact: None,
            output_dir,
            local_config: None,
            global_configs_file: None,
            global_config_id: None,
        }
    }

    pub fn runtime(mut self, runtime: Option<NormalizedPath>) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn artifact(mut self, artifact: Option<NormalizedPath>) -> Self {
        self.artifact = artifact;
        self
    }

    /// Passed only if a file exists at this path when [`Self::build`] runs.
    pub fn local_config(mut self, path: Option<NormalizedPath>) -> Self {
        self.local_config = path;
        self
    }

    pub fn global_configs_file(mut self, path: Option<NormalizedPath>) -> Self {
        self.global_configs_file = path;
        self
    }

    pub fn global_config_id(mut self, id: Option<String>) -> Self {
        self.global_config_id = id;
        self
    }

    pub fn build(self) -> Result<Invocation> {
        let program = non_empty_path(self.runtime).ok_or(Error::RuntimeNotFound)?;
        let artifact = non_empty_path(self.artifact).ok_or(Error::ArtifactNotFound)?;

        let output_dir = self.output_dir.absolute()?;
        let mut args = vec![
            InvocationArg::Flag(JAR_FLAG),
            InvocationArg::Path(artifact),
            InvocationArg::Flag(OUT_DIR_FLAG),
            InvocationArg::Path(output_dir.clone()),
        ];

        if let Some(local) = non_empty_path(self.local_config) {
            if file_exists(&local)? {
                args.push(InvocationArg::Flag(LOCAL_CONFIG_FLAG));
                args.push(InvocationArg::Path(local.absolute()?));
            } else {
                tracing::debug!(
                    path = %local,
                    "No local configuration file, resolver uses defaults"
                );
            }
        }

        if let Some(global) = non_empty_path(self.global_configs_file) {
            args.push(InvocationArg::Flag(GLOBAL_CONFIGS_FILE_FLAG));
            args.push(InvocationArg::Path(global.absolute()?));
        }

        if let Some(id) = self.global_config_id.filter(|id| !id.is_empty()) {
            args.push(InvocationArg::Flag(GLOBAL_CONFIG_ID_FLAG));
            args.push(InvocationArg::Value(id));
        }

        Ok(Invocation {
            program,
            args,
            output_dir,
        })
    }
}

fn non_empty_path(path: Option<NormalizedPath>) -> Option<NormalizedPath> {
    path.filter(|p| !p.as_str().is_empty())
}
