//! Subprocess execution for external tools
//!
//! Wraps `std::process::Command` so that every invocation of an external
//! tool (git, the configuration resolver) is captured the same way: stdout,
//! stderr and exit code are returned to the caller, and, when a log
//! directory is configured, appended to `<log_dir>/<tool>.log`.

pub mod error;
pub mod runner;

pub use error::{ExecError, Result};
pub use runner::{CommandOutput, ProcessRunner};
