//! Locating the project's local configuration file

use qodana_fs::{NormalizedPath, QodanaPath};

/// Name of the local configuration file in `project_dir`, relative to it.
///
/// Prefers `qodana.yaml`, then `qodana.yml`. When neither exists the
/// default name is returned anyway: the resolver then runs without a local
/// layer.
pub fn find_default_local_config(project_dir: &NormalizedPath) -> String {
    for candidate in [QodanaPath::LocalYaml, QodanaPath::LocalYml] {
        if project_dir.join(candidate.as_str()).is_file() {
            return candidate.as_str().to_string();
        }
    }
    QodanaPath::LocalYaml.as_str().to_string()
}

/// Full path of a local configuration given relative to the project.
///
/// Absolute paths are returned unchanged.
pub fn local_config_path_with_project(project_dir: &NormalizedPath, local: &str) -> NormalizedPath {
    project_dir.join(local)
}
