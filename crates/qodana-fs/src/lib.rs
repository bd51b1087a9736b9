//! Filesystem helpers for Qodana configuration resolution
//!
//! Provides normalized path handling, absolute-path resolution, existence
//! probes and safe I/O for the scratch directory.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::QodanaPath;
pub use error::{Error, Result};
pub use path::{NormalizedPath, file_exists};
