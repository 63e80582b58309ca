//! Docstring registry: the documented bindings `@docs` and `@autodocs`
//! blocks expand to.
//!
//! ```toml
//! [[docstring]]
//! binding = "WienerDiffusionModel.Wiener"
//! category = "type"
//! text = """
//! A struct representing a Wiener diffusion model distribution.
//! """
//! ```

use crate::error::ConfigError;
use crate::record::Category;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Docstring {
    /// Full dotted path, e.g. `WienerDiffusionModel.Wiener`.
    pub binding: String,
    /// Everything before the last `.` of the binding.
    pub module: String,
    pub category: Category,
    /// Markdown source of the docstring.
    pub text: String,
}

impl Docstring {
    pub fn name(&self) -> &str {
        &self.binding[self.module.len() + 1..]
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
    #[serde(default)]
    docstring: Vec<RawDocstring>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDocstring {
    binding: String,
    category: Category,
    text: String,
}

/// Docstrings in registry order, indexed by binding.
#[derive(Debug, Clone, Default)]
pub struct DocstringRegistry {
    entries: Vec<Docstring>,
    by_binding: HashMap<String, usize>,
}

impl DocstringRegistry {
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: RegistryFile = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut registry = Self::default();
        for raw in file.docstring {
            let binding = raw.binding.trim().to_string();
            let module = match binding.rsplit_once('.') {
                Some((module, name)) if !module.is_empty() && !name.is_empty() => {
                    module.to_string()
                }
                _ => {
                    return Err(ConfigError::InvalidBinding {
                        binding,
                        path: path.to_path_buf(),
                    });
                }
            };
            if !raw.category.is_docstring() {
                return Err(ConfigError::InvalidCategory {
                    binding,
                    category: raw.category.to_string(),
                    path: path.to_path_buf(),
                });
            }
            if registry.by_binding.contains_key(&binding) {
                return Err(ConfigError::DuplicateBinding {
                    binding,
                    path: path.to_path_buf(),
                });
            }

            registry
                .by_binding
                .insert(binding.clone(), registry.entries.len());
            registry.entries.push(Docstring {
                binding,
                module,
                category: raw.category,
                text: raw.text,
            });
        }

        Ok(registry)
    }

    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let registry = Self::from_toml(&content, path)?;
        tracing::debug!(
            "Loaded {} docstrings from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, binding: &str) -> Option<&Docstring> {
        self.by_binding.get(binding).map(|&i| &self.entries[i])
    }

    /// Looks `name` up relative to `current_module` first, then as a full binding.
    pub fn resolve(&self, name: &str, current_module: Option<&str>) -> Option<&Docstring> {
        current_module
            .and_then(|module| self.get(&format!("{}.{}", module, name)))
            .or_else(|| self.get(name))
    }

    /// Docstrings whose module is one of `modules`, in registry order.
    pub fn in_modules<'a>(&'a self, modules: &'a [String]) -> impl Iterator<Item = &'a Docstring> + 'a {
        self.entries
            .iter()
            .filter(move |d| modules.iter().any(|m| m == &d.module))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Docstring> {
        self.entries.iter()
    }
}
