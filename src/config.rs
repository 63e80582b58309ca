//! `docs.toml`: layout of a documentation source tree.

use crate::codec::{DEFAULT_VARIABLE, is_valid_identifier};
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "docs.toml";

/// Configuration of a documentation source tree.
///
/// All paths are relative to the directory holding `docs.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocsConfig {
    pub sitename: Option<String>,
    /// Modules whose docstrings the site documents. Informational; `@autodocs`
    /// blocks name their modules explicitly.
    pub modules: Vec<String>,
    /// Directory containing the markdown pages.
    pub source: PathBuf,
    /// Docstring registry. When absent, `docstrings.toml` is used if present.
    pub docstrings: Option<PathBuf>,
    pub output: PathBuf,
    /// Link pages as `name/` instead of `name.html`.
    pub pretty_urls: bool,
    /// Variable the embedded index is assigned to.
    pub variable: String,
    /// Fail the build on `@docs` bindings with no docstring.
    pub strict: bool,
    /// Pages in site order. Empty means discover every `*.md` under `source`.
    pub pages: Vec<PageEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageEntry {
    pub title: Option<String>,
    pub file: PathBuf,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            sitename: None,
            modules: Vec::new(),
            source: PathBuf::from("src"),
            docstrings: None,
            output: PathBuf::from("build/search_index.js"),
            pretty_urls: true,
            variable: DEFAULT_VARIABLE.to_string(),
            strict: true,
            pages: Vec::new(),
        }
    }
}

impl DocsConfig {
    /// Parses configuration text. `path` is only used in error messages.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if !is_valid_identifier(&config.variable) {
            return Err(ConfigError::InvalidVariable {
                variable: config.variable,
                path: path.to_path_buf(),
            });
        }
        Ok(config)
    }

    /// Loads `docs.toml` from `root`, falling back to defaults when the file
    /// does not exist.
    pub async fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                tracing::debug!("Loaded configuration from {}", path.display());
                Self::from_toml(&content, &path)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No {} in {}, using defaults", CONFIG_FILE, root.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    /// Registry path to read, if any.
    pub fn docstrings_path(&self, root: &Path) -> Option<PathBuf> {
        match &self.docstrings {
            Some(path) => Some(root.join(path)),
            None => {
                let fallback = root.join("docstrings.toml");
                fallback.is_file().then_some(fallback)
            }
        }
    }
}
