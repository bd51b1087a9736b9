//! Error types for qodana-cli

use qodana_git::TraversalError;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] qodana_config::Error),

    #[error(transparent)]
    Git(#[from] qodana_git::Error),

    #[error(transparent)]
    Traversal(#[from] TraversalError<qodana_config::Error>),

    #[error("Failed to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// A failed resolver run exits with the resolver's own code, also when
    /// it happened inside a traversal.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(e) => e.exit_code(),
            Self::Traversal(TraversalError::Visit { source, .. }) => source.exit_code(),
            _ => 1,
        }
    }
}
