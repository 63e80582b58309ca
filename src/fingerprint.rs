use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use xxhash_rust::xxh3::Xxh3;

/// Fingerprint for tracking when the search index needs regeneration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFingerprint {
    /// Generator version (invalidates every index on upgrade)
    pub generator: String,
    /// Combined hash of configuration, registry and pages
    pub source_hash: u64,
    /// Number of pages hashed
    pub pages: usize,
}

/// Incremental hasher over the inputs of one build
pub struct FingerprintBuilder {
    hasher: Xxh3,
    pages: usize,
}

impl Default for FingerprintBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FingerprintBuilder {
    pub fn new() -> Self {
        Self {
            hasher: Xxh3::new(),
            pages: 0,
        }
    }

    /// Hash a labelled input. Labels keep `("a", "bc")` distinct from `("ab", "c")`.
    pub fn input(&mut self, label: &str, content: &str) -> &mut Self {
        self.hasher.update(&(label.len() as u64).to_le_bytes());
        self.hasher.update(label.as_bytes());
        self.hasher.update(&(content.len() as u64).to_le_bytes());
        self.hasher.update(content.as_bytes());
        self
    }

    /// Hash a page (relative path + contents)
    pub fn page(&mut self, file: &Path, content: &str) -> &mut Self {
        self.pages += 1;
        self.input(&file.to_string_lossy(), content)
    }

    pub fn finish(&self) -> SourceFingerprint {
        SourceFingerprint {
            generator: env!("CARGO_PKG_VERSION").to_string(),
            source_hash: self.hasher.digest(),
            pages: self.pages,
        }
    }
}

/// Where the fingerprint for an index file lives
pub fn fingerprint_path(output: &Path) -> PathBuf {
    let mut name = output.file_name().unwrap_or_default().to_os_string();
    name.push(".fingerprint");
    output.with_file_name(name)
}

/// Load a fingerprint from disk. Unreadable or corrupt files count as absent.
pub fn load_fingerprint(path: &Path) -> Option<SourceFingerprint> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Save a fingerprint to disk
pub fn save_fingerprint(path: &Path, fingerprint: &SourceFingerprint) -> crate::error::Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(fingerprint)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fingerprint(pages: &[(&str, &str)]) -> SourceFingerprint {
        let mut builder = FingerprintBuilder::new();
        builder.input("docs.toml", "");
        for (file, content) in pages {
            builder.page(Path::new(file), content);
        }
        builder.finish()
    }

    #[test]
    fn same_inputs_same_hash() {
        let a = fingerprint(&[("index.md", "# Home")]);
        let b = fingerprint(&[("index.md", "# Home")]);
        assert_eq!(a, b);
        assert_eq!(a.pages, 1);
    }

    #[test]
    fn content_and_boundaries_matter() {
        let base = fingerprint(&[("index.md", "# Home")]);
        assert_ne!(base, fingerprint(&[("index.md", "# Home!")]));
        assert_ne!(base, fingerprint(&[("index.m", "d# Home")]));
    }

    #[test]
    fn corrupt_file_is_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("search_index.js.fingerprint");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(load_fingerprint(&path), None);
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = fingerprint_path(&dir.path().join("build/search_index.js"));
        assert!(path.ends_with("build/search_index.js.fingerprint"));

        let fp = fingerprint(&[("index.md", "# Home")]);
        save_fingerprint(&path, &fp).unwrap();
        assert_eq!(load_fingerprint(&path), Some(fp));
    }
}
