//! Project configuration stored in `.lineage/config.json`.

use lineage_graph::{IgnorePatterns, PatchTable};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_DIR: &str = ".lineage";
pub const CONFIG_FILE: &str = "config.json";

/// Failure reading a config or input JSON file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Reads and deserializes a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Settings for a `lineage report` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineageConfig {
    pub version: String,
    /// Patterns matched from the project root, e.g. `/vendor`.
    pub absolute_ignore: Vec<String>,
    /// Patterns matched at any depth, e.g. `node_modules`.
    pub relative_ignore: Vec<String>,
    /// Extra parent/mixin relationships invisible to static analysis.
    pub patches: PatchTable,
}

impl Default for LineageConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            absolute_ignore: Vec::new(),
            relative_ignore: Vec::new(),
            patches: PatchTable::default(),
        }
    }
}

impl LineageConfig {
    pub fn path_in(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        read_json(path)
    }

    /// Loads `path` if given, else `.lineage/config.json` under `root` if it
    /// exists, else the defaults.
    pub fn resolve(path: Option<&Path>, root: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let default_path = Self::path_in(root);
        if default_path.exists() {
            Self::load(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn ignore_patterns(&self) -> IgnorePatterns {
        IgnorePatterns::new(&self.absolute_ignore, &self.relative_ignore)
    }
}
