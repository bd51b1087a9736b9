//! Error types for subprocess execution

use std::path::PathBuf;

/// Errors that can occur while launching an external tool
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// The program could not be started at all
    #[error("Failed to launch {program}: {source}")]
    Launch {
        /// Program that was being launched
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The per-tool log file could not be opened or written
    #[error("Failed to write {tool} log at {path}: {source}")]
    LogFile {
        /// Tool name the log belongs to
        tool: String,
        /// Path of the log file
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for subprocess execution
pub type Result<T> = std::result::Result<T, ExecError>;
