//! Resolution across revisions with a real git working tree.

use pretty_assertions::assert_eq;
use qodana_config::{
    ArtifactSource, ConfigResolverClient, Error, Invocation, RecordingReporter, ResolveOptions,
    Result,
};
use qodana_fs::NormalizedPath;
use qodana_git::{GitCli, RevisionWalker, TraversalError};
use qodana_test_utils::git::{git, head_branch, head_revision, real_git_repo_with_commits};
use qodana_test_utils::resolver::OutputSet;
use std::cell::Cell;
use tempfile::TempDir;

/// Succeeds on the first call, then fails with exit code 3.
fn flaky_resolver(calls: &Cell<usize>) -> impl Fn(&Invocation) -> Result<()> + '_ {
    move |invocation: &Invocation| -> Result<()> {
        calls.set(calls.get() + 1);
        if calls.get() > 1 {
            return Err(Error::ResolutionFailed { exit_code: 3 });
        }
        OutputSet::effective_only("linter: jetbrains/qodana-jvm\n")
            .write_to(&invocation.output_dir().to_native());
        Ok(())
    }
}

fn options(repo: &TempDir, scratch: &TempDir) -> ResolveOptions {
    let mut options = ResolveOptions::new(repo.path(), scratch.path());
    options.runtime = Some(NormalizedPath::new("/usr/bin/java"));
    options
}

#[test]
fn test_resolver_failure_restores_original_branch() {
    let repo = TempDir::new().unwrap();
    let scratch = TempDir::new().unwrap();
    let hashes = real_git_repo_with_commits(repo.path(), 2);
    let cli = GitCli::new(repo.path());
    let walker = RevisionWalker::new(&cli);
    let calls = Cell::new(0);
    let client = ConfigResolverClient::with_reporter(
        flaky_resolver(&calls),
        ArtifactSource::Bytes(b"jar".to_vec()),
        Box::new(RecordingReporter::new()),
    );
    let options = options(&repo, &scratch);

    let revisions = walker.full_history(None).unwrap();
    let err = walker
        .walk(&revisions, |_| client.resolve(&options))
        .unwrap_err();

    match err {
        TraversalError::Visit { revision, source } => {
            assert_eq!(revision, hashes[1]);
            assert_eq!(source.exit_code(), 3);
        }
        other => panic!("expected visit failure, got {other:?}"),
    }
    assert_eq!(calls.get(), 2);
    assert_eq!(head_branch(repo.path()).as_deref(), Some("main"));
    assert_eq!(head_revision(repo.path()), hashes[1]);
    assert!(git(repo.path(), &["status", "--porcelain"]).is_empty());
    assert!(!scratch.path().join("tools/config-loader-cli.jar").exists());
}

#[test]
fn test_staged_resolution_failure_resets_back() {
    let repo = TempDir::new().unwrap();
    let scratch = TempDir::new().unwrap();
    let hashes = real_git_repo_with_commits(repo.path(), 2);
    let cli = GitCli::new(repo.path());
    let walker = RevisionWalker::new(&cli);
    let calls = Cell::new(1);
    let client = ConfigResolverClient::with_reporter(
        flaky_resolver(&calls),
        ArtifactSource::Bytes(b"jar".to_vec()),
        Box::new(RecordingReporter::new()),
    );
    let options = options(&repo, &scratch);

    let err = walker
        .staged(&hashes[0], |_| client.resolve(&options))
        .unwrap_err();

    assert!(matches!(err, TraversalError::Visit { .. }));
    assert_eq!(head_revision(repo.path()), hashes[1]);
    assert_eq!(head_branch(repo.path()).as_deref(), Some("main"));
}
