//! Well-known file and directory names used during configuration resolution.

use std::path::Path;

/// File names produced or consumed around a resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QodanaPath {
    /// The local `qodana.yaml` (also the name of the resolver's local echo)
    LocalYaml,
    /// Alternative spelling of the local configuration file
    LocalYml,
    /// The merged configuration written by the resolver
    EffectiveYaml,
    /// Resolver-internal structured state
    ConfigJson,
    /// Directory under the scratch root holding provisioned tools
    ToolsDir,
    /// The provisioned resolver artifact
    ConfigLoaderJar,
    /// Default output directory name for a resolution pass
    EffectiveConfigDir,
}

impl QodanaPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LocalYaml => "qodana.yaml",
            Self::LocalYml => "qodana.yml",
            Self::EffectiveYaml => "effective.qodana.yaml",
            Self::ConfigJson => "qodana-config.json",
            Self::ToolsDir => "tools",
            Self::ConfigLoaderJar => "config-loader-cli.jar",
            Self::EffectiveConfigDir => "effective-config",
        }
    }
}

impl AsRef<Path> for QodanaPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for QodanaPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for QodanaPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
