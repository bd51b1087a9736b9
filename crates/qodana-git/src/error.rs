//! Error types for qodana-git

/// Result type for qodana-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in qodana-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Exec(#[from] qodana_exec::ExecError),

    #[error("git {command} failed (exit code {code}): {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Revision '{revision}' does not exist")]
    RevisionNotFound { revision: String },

    #[error("'{revision}' is not a revision: it would be read as a git option")]
    InvalidRevision { revision: String },

    #[error("Repository has no commits")]
    EmptyHistory,
}
