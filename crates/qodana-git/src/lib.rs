//! Version-control operations for Qodana configuration resolution
//!
//! The working tree is a process-wide shared resource: analysing a past
//! revision means mutating it, and every mutation must be paired with a
//! restore. [`RevisionWalker`] owns that pairing; [`GitCli`] provides the
//! underlying `git` subprocess calls through the [`VersionControl`] trait.

pub mod cli;
pub mod error;
pub mod provider;
pub mod traversal;

pub use cli::GitCli;
pub use error::{Error, Result};
pub use provider::VersionControl;
pub use traversal::{Interrupt, RestoreStrategy, RevisionWalker, TraversalError, WorkingTreeGuard};
