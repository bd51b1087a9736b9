//! Canned resolver output sets.
//!
//! Writes the files a configuration resolver would leave behind in its
//! output directory, without running one.

use std::fs;
use std::path::Path;

use qodana_fs::QodanaPath;

/// Which files to write and with what content. `None` leaves a file absent.
#[derive(Debug, Clone, Default)]
pub struct OutputSet<'a> {
    /// `effective.qodana.yaml`
    pub effective: Option<&'a str>,
    /// `qodana.yaml` echo of the local layer
    pub local_echo: Option<&'a str>,
    /// `qodana-config.json`
    pub state: Option<&'a str>,
}

impl<'a> OutputSet<'a> {
    /// A coherent set: effective config plus resolver state, no local echo.
    pub fn effective_only(effective: &'a str) -> Self {
        Self {
            effective: Some(effective),
            local_echo: None,
            state: Some("{}"),
        }
    }

    /// A coherent set with all three files.
    pub fn full(effective: &'a str, local_echo: &'a str) -> Self {
        Self {
            effective: Some(effective),
            local_echo: Some(local_echo),
            state: Some("{}"),
        }
    }

    /// Write the set into `dir`, creating it if needed.
    ///
    /// # Panics
    /// Panics if the filesystem operations fail.
    pub fn write_to(&self, dir: &Path) {
        fs::create_dir_all(dir)
            .unwrap_or_else(|e| panic!("failed to create {}: {e}", dir.display()));
        let files = [
            (QodanaPath::EffectiveYaml, self.effective),
            (QodanaPath::LocalYaml, self.local_echo),
            (QodanaPath::ConfigJson, self.state),
        ];
        for (name, content) in files {
            if let Some(content) = content {
                fs::write(dir.join(name.as_str()), content)
                    .unwrap_or_else(|e| panic!("failed to write {name}: {e}"));
            }
        }
    }
}
