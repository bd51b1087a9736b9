//! Revision traversal with guaranteed working-tree restore
//!
//! Each visited revision follows the same state machine:
//! `Clean -> Modified(revision) -> Clean`. The transition back to `Clean`
//! is owned by a [`WorkingTreeGuard`], so it runs whether the visit
//! succeeds, fails, or unwinds.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::provider::VersionControl;
use crate::{Error, Result};

/// How the working tree is put back after a revision has been visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreStrategy {
    /// Force-checkout the ref that was current before traversal began.
    Checkout { original: String },
    /// Undo a `reset --soft` staging step.
    ResetBack,
}

impl RestoreStrategy {
    /// Whether a failed preparation step still needs restoring.
    ///
    /// A forced checkout can fail halfway and leave files behind. A failed
    /// `reset --soft` has not moved HEAD, and `reset HEAD@{1}` would then
    /// rewind the branch past an unrelated reflog entry.
    pub fn restores_failed_prepare(&self) -> bool {
        matches!(self, Self::Checkout { .. })
    }
}

/// Shared flag set by an interrupt handler.
///
/// The walker only looks at it between revisions, after the previous
/// revision has been restored; an interrupt never cuts a mutate/restore
/// pair in half.
#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that traversal stop at the next revision boundary.
    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Scoped ownership of one working-tree mutation.
///
/// Call [`WorkingTreeGuard::restore`] to restore and observe failures. If
/// the guard is dropped without it (panic, early return) the restore still
/// runs and failures are logged.
pub struct WorkingTreeGuard<'a, V: VersionControl + ?Sized> {
    vcs: &'a V,
    strategy: RestoreStrategy,
    restored: bool,
}

impl<'a, V: VersionControl + ?Sized> WorkingTreeGuard<'a, V> {
    /// Take responsibility for restoring the working tree with `strategy`.
    ///
    /// Create it once the working tree has actually moved. Only a checkout
    /// is guarded before it runs; see
    /// [`RestoreStrategy::restores_failed_prepare`].
    pub fn new(vcs: &'a V, strategy: RestoreStrategy) -> Self {
        Self {
            vcs,
            strategy,
            restored: false,
        }
    }

    pub fn strategy(&self) -> &RestoreStrategy {
        &self.strategy
    }

    /// Restore the working tree now.
    pub fn restore(mut self) -> Result<()> {
        self.restored = true;
        run_restore(self.vcs, &self.strategy)
    }
}

impl<V: VersionControl + ?Sized> Drop for WorkingTreeGuard<'_, V> {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        if let Err(e) = run_restore(self.vcs, &self.strategy) {
            tracing::error!(
                strategy = ?self.strategy,
                error = %e,
                "Failed to restore working tree"
            );
        }
    }
}

fn run_restore<V: VersionControl + ?Sized>(vcs: &V, strategy: &RestoreStrategy) -> Result<()> {
    tracing::debug!(?strategy, "Restoring working tree");
    match strategy {
        RestoreStrategy::Checkout { original } => vcs.checkout(original, true),
        RestoreStrategy::ResetBack => vcs.reset_back(),
    }
}

/// Errors surfaced by a traversal.
///
/// `E` is the error type of the per-revision visit.
#[derive(Debug, thiserror::Error)]
pub enum TraversalError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Git(#[from] Error),

    #[error("Failed to prepare revision {revision}: {source}")]
    Prepare {
        revision: String,
        #[source]
        source: Error,
    },

    #[error("Processing revision {revision} failed: {source}")]
    Visit {
        revision: String,
        #[source]
        source: E,
    },

    #[error("Failed to restore working tree after revision {revision}: {source}")]
    Restore {
        revision: String,
        #[source]
        source: Error,
    },

    #[error("Traversal interrupted before revision {revision}")]
    Interrupted { revision: String },
}

/// Drives per-revision work over a working tree.
pub struct RevisionWalker<'a, V: VersionControl + ?Sized> {
    vcs: &'a V,
    interrupt: Interrupt,
}

impl<'a, V: VersionControl + ?Sized> RevisionWalker<'a, V> {
    pub fn new(vcs: &'a V) -> Self {
        Self {
            vcs,
            interrupt: Interrupt::new(),
        }
    }

    /// Stop between revisions once `interrupt` is triggered.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Fail fast if `revision` does not exist or looks like an option.
    pub fn ensure_exists(&self, revision: &str) -> Result<()> {
        if revision.starts_with('-') {
            return Err(Error::InvalidRevision {
                revision: revision.to_string(),
            });
        }
        if self.vcs.revision_exists(revision) {
            Ok(())
        } else {
            Err(Error::RevisionNotFound {
                revision: revision.to_string(),
            })
        }
    }

    /// Revisions to visit for a full-history run, oldest first.
    ///
    /// With `start`, the sequence begins at that revision (inclusive).
    /// `start` may be anything git resolves to a commit: a hash prefix, a
    /// branch, `HEAD~2`. It is validated before anything else happens.
    pub fn full_history(&self, start: Option<&str>) -> Result<Vec<String>> {
        let start = match start {
            Some(start) => {
                self.ensure_exists(start)?;
                Some((start, self.vcs.resolve_revision(start)?))
            }
            None => None,
        };
        let revisions = self.vcs.revisions()?;
        let Some((start, hash)) = start else {
            return Ok(revisions);
        };
        match revisions.iter().position(|r| *r == hash) {
            Some(idx) => Ok(revisions[idx..].to_vec()),
            None => Err(Error::RevisionNotFound {
                revision: start.to_string(),
            }),
        }
    }

    /// The ref a full-history traversal returns to: the current branch, or
    /// the current revision when HEAD is detached.
    pub fn original_ref(&self) -> Result<String> {
        let branch = self.vcs.branch()?;
        if branch == "HEAD" {
            self.vcs.current_revision()
        } else {
            Ok(branch)
        }
    }

    /// Visit every revision in order.
    ///
    /// For each revision: `checkout -f`, `clean`, `visit`, then restore to
    /// the original ref. The first failure stops the traversal; the working
    /// tree is restored before it is returned.
    pub fn walk<T, E, F>(
        &self,
        revisions: &[String],
        mut visit: F,
    ) -> std::result::Result<Vec<T>, TraversalError<E>>
    where
        E: std::error::Error + 'static,
        F: FnMut(&str) -> std::result::Result<T, E>,
    {
        let original = self.original_ref()?;
        tracing::info!(count = revisions.len(), %original, "Starting revision traversal");

        let mut results = Vec::with_capacity(revisions.len());
        for revision in revisions {
            if self.interrupt.is_triggered() {
                return Err(TraversalError::Interrupted {
                    revision: revision.clone(),
                });
            }
            let strategy = RestoreStrategy::Checkout {
                original: original.clone(),
            };
            let value = self.visit_one(
                revision,
                strategy,
                |vcs| {
                    vcs.checkout(revision, true)?;
                    vcs.clean()
                },
                |rev| visit(rev),
            )?;
            results.push(value);
        }
        Ok(results)
    }

    /// Stage `revision` with `reset --soft`, run `visit`, then undo the
    /// reset. The revision is validated before the working tree is touched.
    pub fn staged<T, E, F>(
        &self,
        revision: &str,
        visit: F,
    ) -> std::result::Result<T, TraversalError<E>>
    where
        E: std::error::Error + 'static,
        F: FnOnce(&str) -> std::result::Result<T, E>,
    {
        self.ensure_exists(revision)?;
        self.visit_one(
            revision,
            RestoreStrategy::ResetBack,
            |vcs| vcs.reset(revision),
            visit,
        )
    }

    fn visit_one<T, E, P, F>(
        &self,
        revision: &str,
        strategy: RestoreStrategy,
        prepare: P,
        visit: F,
    ) -> std::result::Result<T, TraversalError<E>>
    where
        E: std::error::Error + 'static,
        P: FnOnce(&V) -> Result<()>,
        F: FnOnce(&str) -> std::result::Result<T, E>,
    {
        tracing::debug!(revision, "Visiting revision");
        let early_guard = strategy
            .restores_failed_prepare()
            .then(|| WorkingTreeGuard::new(self.vcs, strategy.clone()));

        if let Err(source) = prepare(self.vcs) {
            let error = TraversalError::Prepare {
                revision: revision.to_string(),
                source,
            };
            return match early_guard {
                Some(guard) => settle(revision, Err(error), guard.restore()),
                None => {
                    tracing::debug!(revision, "Preparation failed before the working tree moved");
                    Err(error)
                }
            };
        }

        let guard = early_guard.unwrap_or_else(|| WorkingTreeGuard::new(self.vcs, strategy));
        let outcome = visit(revision).map_err(|source| TraversalError::Visit {
            revision: revision.to_string(),
            source,
        });
        settle(revision, outcome, guard.restore())
    }
}

/// Combine the outcome of a visit with the restore that followed it.
fn settle<T, E: std::error::Error + 'static>(
    revision: &str,
    outcome: std::result::Result<T, TraversalError<E>>,
    restored: Result<()>,
) -> std::result::Result<T, TraversalError<E>> {
    match (outcome, restored) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(source)) => Err(TraversalError::Restore {
            revision: revision.to_string(),
            source,
        }),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(restore_err)) => {
            tracing::error!(
                revision,
                error = %restore_err,
                "Failed to restore working tree after error"
            );
            Err(e)
        }
    }
}
