//! Format-detected configuration loading

use serde::de::DeserializeOwned;

use crate::{Error, NormalizedPath, Result, file_exists, io};

/// Loads configuration documents by file extension.
///
/// - `.json` -> JSON
/// - `.yaml`, `.yml` -> YAML
#[derive(Debug, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load a configuration document from a file.
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let content = io::read_text(path)?;
        parse(path, &content)
    }

    /// Load a document, treating a missing file or a document without any
    /// content (blank, comments only) as `T::default()`.
    pub fn load_or_default<T: DeserializeOwned + Default>(
        &self,
        path: &NormalizedPath,
    ) -> Result<T> {
        if !file_exists(path)? {
            tracing::debug!(%path, "Config file missing, using defaults");
            return Ok(T::default());
        }
        let content = io::read_text(path)?;
        if is_blank_document(&content) {
            return Ok(T::default());
        }
        parse(path, &content)
    }
}

fn parse<T: DeserializeOwned>(path: &NormalizedPath, content: &str) -> Result<T> {
    let extension = path.extension().unwrap_or("");

    match extension.to_lowercase().as_str() {
        "json" => serde_json::from_str(content).map_err(|e| Error::ConfigParse {
            path: path.to_native(),
            format: "JSON".into(),
            message: e.to_string(),
        }),
        "yaml" | "yml" => serde_yaml::from_str(content).map_err(|e| Error::ConfigParse {
            path: path.to_native(),
            format: "YAML".into(),
            message: e.to_string(),
        }),
        _ => Err(Error::UnsupportedFormat {
            extension: extension.to_string(),
        }),
    }
}

fn is_blank_document(content: &str) -> bool {
    content.lines().all(|line| {
        let trimmed = line.trim();
        trimmed.is_empty() || trimmed.starts_with('#') || trimmed == "---"
    })
}
