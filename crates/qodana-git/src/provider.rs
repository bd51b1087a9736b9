//! Version-control capability used by revision traversal

use crate::Result;

/// The subset of version-control operations revision traversal needs.
///
/// [`crate::GitCli`] implements this over the `git` executable; tests can
/// substitute a recording double to assert the mutate/restore ordering.
pub trait VersionControl {
    /// All revisions reachable from HEAD, oldest first.
    fn revisions(&self) -> Result<Vec<String>>;

    /// Move the working tree to `target` (revision or branch).
    ///
    /// With `force = false` git refuses to overwrite local modifications.
    fn checkout(&self, target: &str, force: bool) -> Result<()>;

    /// `reset --soft`: move the revision pointer, keep working tree files.
    fn reset(&self, revision: &str) -> Result<()>;

    /// Undo the immediately preceding [`VersionControl::reset`].
    fn reset_back(&self) -> Result<()>;

    /// Remove untracked and ignored files.
    fn clean(&self) -> Result<()>;

    /// Current branch name, `HEAD` when detached.
    fn branch(&self) -> Result<String>;

    /// Full hash of the current revision.
    fn current_revision(&self) -> Result<String>;

    /// Whether `revision` names an existing commit.
    fn revision_exists(&self, revision: &str) -> bool;

    /// Full commit hash `revision` (hash prefix, branch, `HEAD~1`, ...)
    /// points to.
    fn resolve_revision(&self, revision: &str) -> Result<String>;
}
