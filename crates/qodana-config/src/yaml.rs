//! The parts of `qodana.yaml` this crate reads
//!
//! Only fields needed before analysis starts are modelled; everything else
//! in the document is ignored.

use serde::{Deserialize, Serialize};

use qodana_fs::{ConfigStore, NormalizedPath};

use crate::Result;

/// Inspection profile selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub path: String,
}

/// A parsed `qodana.yaml` (or `effective.qodana.yaml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QodanaYaml {
    /// Native IDE distribution code, e.g. `QDJVM`
    pub ide: String,

    /// Linter image, e.g. `jetbrains/qodana-jvm:latest`
    pub linter: String,

    pub profile: Profile,

    /// Files merged into this configuration by the resolver
    pub imports: Vec<String>,
}

impl QodanaYaml {
    /// Load from `path`; a missing or blank document is the default.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        Ok(ConfigStore::new().load_or_default(path)?)
    }

    pub fn identity(&self) -> Identity {
        Identity {
            ide: self.ide.clone(),
            linter: self.linter.clone(),
        }
    }
}

/// The declared IDE and linter of one configuration layer.
///
/// Either may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub ide: String,
    pub linter: String,
}

impl Identity {
    /// Neither IDE nor linter is declared.
    pub fn is_unconstrained(&self) -> bool {
        self.ide.is_empty() && self.linter.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_reads_identity_and_imports() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("effective.qodana.yaml");
        std::fs::write(
            &file,
            "version: \"1.0\"\nlinter: jetbrains/qodana-jvm\nimports:\n  - team/qodana.yaml\nprofile:\n  name: qodana.recommended\n",
        )
        .unwrap();

        let yaml = QodanaYaml::load(&NormalizedPath::new(&file)).unwrap();
        assert_eq!(yaml.imports, vec!["team/qodana.yaml"]);
        assert_eq!(yaml.profile.name, "qodana.recommended");
        assert_eq!(
            yaml.identity(),
            Identity {
                ide: String::new(),
                linter: "jetbrains/qodana-jvm".into(),
            }
        );
    }

    #[test]
    fn test_unconstrained_identity() {
        assert!(Identity::default().is_unconstrained());
        assert!(
            !Identity {
                ide: "QDPY".into(),
                linter: String::new(),
            }
            .is_unconstrained()
        );
    }
}
