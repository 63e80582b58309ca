//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `wiener_site`: a documentation tree with one "Home" page documenting the
//!   `WienerDiffusionModel.Wiener` type through `@autodocs`
//! - `reference_index`: the fixture index in `tests/fixtures/search_index.js`
//!
//! [`TempWorkspace`] provides the temp directory abstraction both build on.

#![allow(dead_code)] // Items used across different integration test crates

use doc_search_index::SearchIndex;
use rstest::fixture;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Returns the project root directory (where Cargo.toml lives).
pub fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// A temporary workspace directory for test isolation.
///
/// Provides basic filesystem operations within a temp directory that is
/// automatically cleaned up when dropped.
///
/// # Example
///
/// ```ignore
/// let workspace = TempWorkspace::new();
/// workspace.create_file("src/index.md", "# Home");
/// assert!(workspace.path().join("src/index.md").exists());
/// ```
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

impl TempWorkspace {
    /// Creates a new empty temporary workspace.
    pub fn new() -> Self {
        doc_search_index::logging::init_for_tests();
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Returns the root path of this workspace.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates a file with the given content, creating parent directories.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn create_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write '{}': {}", path, e));
    }

    /// Reads a file relative to the workspace root.
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.root.join(path))
            .unwrap_or_else(|e| panic!("Failed to read '{}': {}", path, e))
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

pub const WIENER_CONFIG: &str = r#"
sitename = "WienerDiffusionModel.jl"
modules = ["WienerDiffusionModel"]
docstrings = "docstrings.toml"

[[pages]]
title = "Home"
file = "index.md"
"#;

pub const WIENER_HOME: &str = r#"```@meta
CurrentModule = WienerDiffusionModel
```

# WienerDiffusionModel

Documentation for [WienerDiffusionModel](https://github.com/example/WienerDiffusionModel.jl).

```@index
```

```@autodocs
Modules = [WienerDiffusionModel]
```
"#;

pub const WIENER_DOCSTRINGS: &str = r#"
[[docstring]]
binding = "WienerDiffusionModel.Wiener"
category = "type"
text = """
```julia
Wiener(ν, α, τ, z)
Wiener(ν, α, τ)
```

A struct representing a Wiener diffusion model distribution.

# Arguments

- `ν::Real`: The drift rate. This represents the speed of information accumulation or the ease of the decision process.
- `α::Real`: The boundary separation. This parameter represents the amount of information needed before a decision is made.
- `τ::Real ≥ 0`: The non-decision time. This represents the time taken by non-decision processes such as stimulus encoding and motor response.
- `z::Real ∈ [0, 1]`: The relative bias. When not provided, the relative bias will be fixed to 0.5 denoting equal bias towards either decision.

```julia
Wiener(ν, α, τ, z)

params(d)            # Get the parameters, i.e. (ν, α, τ, z)
```
"""
"#;

/// A documentation tree for the Wiener diffusion model package.
#[fixture]
pub fn wiener_site() -> TempWorkspace {
    let workspace = TempWorkspace::new();
    workspace.create_file("docs.toml", WIENER_CONFIG);
    workspace.create_file("src/index.md", WIENER_HOME);
    workspace.create_file("docstrings.toml", WIENER_DOCSTRINGS);
    workspace
}

/// The reference index shipped under `tests/fixtures`.
#[fixture]
pub fn reference_index() -> SearchIndex {
    let path = project_root().join("tests/fixtures/search_index.js");
    let content = std::fs::read_to_string(&path).expect("Failed to read fixture index");
    doc_search_index::codec::parse(&content).expect("Fixture index should parse")
}
