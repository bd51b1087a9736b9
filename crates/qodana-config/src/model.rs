//! The set of files one resolution pass produced

use qodana_fs::{ConfigStore, NormalizedPath, QodanaPath, file_exists};

use crate::yaml::{Identity, QodanaYaml};
use crate::{Error, IncoherentOutput, Result};

/// Resolved configuration layers, immutable once constructed.
///
/// Construction enforces the output-set invariants:
/// - an effective config always comes with resolver state;
/// - a local echo always comes with an effective config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayeredConfig {
    config_dir: NormalizedPath,
    effective_path: Option<NormalizedPath>,
    local_echo_path: Option<NormalizedPath>,
    resolver_state_path: Option<NormalizedPath>,
    effective: QodanaYaml,
}

impl LayeredConfig {
    /// Build from explicit paths, parsing the effective config if present.
    pub fn new(
        config_dir: NormalizedPath,
        effective_path: Option<NormalizedPath>,
        local_echo_path: Option<NormalizedPath>,
        resolver_state_path: Option<NormalizedPath>,
    ) -> Result<Self> {
        let incoherent = |kind| Error::IncoherentOutput {
            dir: config_dir.to_native(),
            kind,
        };
        if effective_path.is_some() && resolver_state_path.is_none() {
            return Err(incoherent(IncoherentOutput::EffectiveWithoutState));
        }
        if local_echo_path.is_some() && effective_path.is_none() {
            return Err(incoherent(IncoherentOutput::LocalEchoWithoutEffective));
        }

        let effective = match &effective_path {
            Some(path) => QodanaYaml::load(path)?,
            None => QodanaYaml::default(),
        };

        Ok(Self {
            config_dir,
            effective_path,
            local_echo_path,
            resolver_state_path,
            effective,
        })
    }

    /// Build from whichever expected files exist in `config_dir`.
    ///
    /// Presence is decided by existence alone, not content.
    pub fn discover(config_dir: &NormalizedPath) -> Result<Self> {
        let present = |name: QodanaPath| -> Result<Option<NormalizedPath>> {
            let path = config_dir.join(name.as_str());
            Ok(file_exists(&path)?.then_some(path))
        };
        let effective = present(QodanaPath::EffectiveYaml)?;
        let local_echo = present(QodanaPath::LocalYaml)?;
        let state = present(QodanaPath::ConfigJson)?;

        tracing::debug!(
            dir = %config_dir,
            effective = effective.is_some(),
            local_echo = local_echo.is_some(),
            state = state.is_some(),
            "Discovered resolver output"
        );
        Self::new(config_dir.clone(), effective, local_echo, state)
    }

    /// The resolver's output directory for this pass.
    pub fn config_dir(&self) -> &NormalizedPath {
        &self.config_dir
    }

    pub fn effective_path(&self) -> Option<&NormalizedPath> {
        self.effective_path.as_ref()
    }

    pub fn local_echo_path(&self) -> Option<&NormalizedPath> {
        self.local_echo_path.as_ref()
    }

    pub fn resolver_state_path(&self) -> Option<&NormalizedPath> {
        self.resolver_state_path.as_ref()
    }

    /// The merged configuration; default when the resolver wrote none.
    pub fn effective_yaml(&self) -> &QodanaYaml {
        &self.effective
    }

    pub fn effective_identity(&self) -> Identity {
        self.effective.identity()
    }

    /// Parse the local echo layer, if the resolver wrote one.
    pub fn local_echo_yaml(&self) -> Result<Option<QodanaYaml>> {
        self.local_echo_path
            .as_ref()
            .map(QodanaYaml::load)
            .transpose()
    }

    /// Resolver-internal state as untyped JSON.
    pub fn resolver_state(&self) -> Result<Option<serde_json::Value>> {
        self.resolver_state_path
            .as_ref()
            .map(|path| ConfigStore::new().load(path).map_err(Error::from))
            .transpose()
    }
}
