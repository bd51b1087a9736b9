//! Listing the traversal sequence

use std::path::Path;

use qodana_git::{GitCli, VersionControl};

use crate::error::Result;

/// Run the revisions command: one hash per line, oldest first.
pub fn run_revisions(project_dir: &Path) -> Result<()> {
    for revision in GitCli::new(project_dir).revisions()? {
        println!("{revision}");
    }
    Ok(())
}
