//! Staging the resolver executable in the scratch directory
//!
//! The artifact lives at `<scratch>/tools/config-loader-cli.jar` for exactly
//! one resolution pass. [`ProvisionedArtifact`] deletes it when dropped, so
//! every exit path of the pass (success, verification error, resolver
//! failure) releases it.

use std::borrow::Cow;
use std::io;

use qodana_fs::{NormalizedPath, QodanaPath, file_exists};

use crate::{Error, Result};

/// Where the resolver artifact's bytes come from.
#[derive(Debug, Clone)]
pub enum ArtifactSource {
    /// Copy an existing file
    File(NormalizedPath),
    /// Write bytes already in memory
    Bytes(Vec<u8>),
}

impl ArtifactSource {
    fn content(&self) -> Result<Cow<'_, [u8]>> {
        match self {
            Self::Bytes(bytes) => Ok(Cow::Borrowed(bytes.as_slice())),
            Self::File(path) => {
                if !file_exists(path)? {
                    return Err(Error::ArtifactNotFound);
                }
                let native = path.to_native();
                std::fs::read(&native)
                    .map(Cow::Owned)
                    .map_err(|e| Error::Provision {
                        path: native.clone(),
                        source: qodana_fs::Error::io(native, e),
                    })
            }
        }
    }
}

/// Writes the resolver artifact to its fixed location under a scratch root.
#[derive(Debug, Clone)]
pub struct ArtifactProvisioner {
    scratch_root: NormalizedPath,
    target: NormalizedPath,
}

impl ArtifactProvisioner {
    pub fn new(scratch_root: &NormalizedPath) -> Self {
        let target = scratch_root
            .join(QodanaPath::ToolsDir.as_str())
            .join(QodanaPath::ConfigLoaderJar.as_str());
        Self {
            scratch_root: scratch_root.clone(),
            target,
        }
    }

    /// The deterministic artifact path.
    pub fn target(&self) -> &NormalizedPath {
        &self.target
    }

    /// Materialize the artifact, replacing any stale copy.
    pub fn provision(&self, source: &ArtifactSource) -> Result<ProvisionedArtifact> {
        if self.scratch_root.as_str().is_empty() {
            return Err(self.provision_error(io::Error::new(
                io::ErrorKind::NotFound,
                "scratch directory is not set",
            )));
        }
        let content = source.content()?;

        qodana_fs::io::remove_if_exists(&self.target).map_err(|source| Error::Provision {
            path: self.target.to_native(),
            source,
        })?;

        tracing::debug!(path = %self.target, "Creating config-loader-cli.jar");
        qodana_fs::io::write_atomic(&self.target, &content).map_err(|source| {
            Error::Provision {
                path: self.target.to_native(),
                source,
            }
        })?;

        Ok(ProvisionedArtifact {
            path: self.target.clone(),
        })
    }

    fn provision_error(&self, e: io::Error) -> Error {
        Error::Provision {
            path: self.target.to_native(),
            source: qodana_fs::Error::io(self.target.to_native(), e),
        }
    }
}

/// A staged resolver artifact, deleted on drop.
#[derive(Debug)]
pub struct ProvisionedArtifact {
    path: NormalizedPath,
}

impl ProvisionedArtifact {
    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }
}

impl Drop for ProvisionedArtifact {
    fn drop(&mut self) {
        // The artifact is disposable; failing to delete it must not fail the run
        if let Err(e) = std::fs::remove_file(self.path.to_native()) {
            tracing::warn!(path = %self.path, error = %e, "Failed to delete config-loader-cli.jar");
        }
    }
}
