//! Shared test utilities for the qodana-config workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: git repositories with real history
//! - [`resolver`]: canned resolver output sets

pub mod git;
pub mod resolver;
