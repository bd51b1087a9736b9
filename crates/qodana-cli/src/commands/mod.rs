//! Command implementations for qodana-cli

pub mod history;
pub mod resolve;
pub mod revisions;

pub use history::{run_history, run_stage};
pub use resolve::run_resolve;
pub use revisions::run_revisions;
