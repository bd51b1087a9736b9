//! Error types for qodana-config

use std::path::PathBuf;

/// Result type for qodana-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// A merge-sensitive field compared across configuration layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityField {
    Ide,
    Linter,
}

impl IdentityField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ide => "ide",
            Self::Linter => "linter",
        }
    }
}

impl std::fmt::Display for IdentityField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A combination of resolver output files that has no safe interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IncoherentOutput {
    #[error("effective.qodana.yaml file doesn't have a qodana-config.json file")]
    EffectiveWithoutState,

    #[error("local qodana.yaml file doesn't have an effective.qodana.yaml file")]
    LocalEchoWithoutEffective,
}

/// Errors that can occur while resolving the effective configuration
///
/// Every variant except [`Error::Mismatch`] means no resolution can happen
/// and the run must stop; see [`Error::is_fatal`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] qodana_fs::Error),

    #[error("JRE not found. Required for effective configuration creation.")]
    RuntimeNotFound,

    #[error("config-loader-cli.jar not found. Required for effective configuration creation.")]
    ArtifactNotFound,

    #[error("Failed to provision config-loader-cli.jar at {path}: {source}")]
    Provision {
        path: PathBuf,
        #[source]
        source: qodana_fs::Error,
    },

    #[error("Failed to launch configuration resolver: {source}")]
    ResolverLaunch {
        #[source]
        source: qodana_exec::ExecError,
    },

    #[error("Configuration resolver exited with code {exit_code}")]
    ResolutionFailed { exit_code: i32 },

    #[error("Resolver output in {dir} is incoherent: {kind}")]
    IncoherentOutput {
        dir: PathBuf,
        #[source]
        kind: IncoherentOutput,
    },

    #[error("effective.qodana.yaml `{field}` doesn't match root qodana.yaml `{field}` (effective '{effective}', local '{local}')")]
    Mismatch {
        field: IdentityField,
        effective: String,
        local: String,
    },
}

impl Error {
    /// Whether the error leaves no way to continue the run.
    ///
    /// Only a cross-layer mismatch is left to the caller's policy.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Mismatch { .. })
    }

    /// Process exit code a command dispatcher should use for this error.
    ///
    /// Resolver failures pass the resolver's own code through.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ResolutionFailed { exit_code } if *exit_code > 0 => *exit_code,
            _ => 1,
        }
    }
}
