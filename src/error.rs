//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for application-level operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when reading or writing a search index fails.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The payload is not valid JSON, or a record does not have the expected shape.
    #[error("invalid search index at line {line}, column {column}: {source}")]
    Json {
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },
    /// The top-level object has no `docs` array.
    #[error("search index object has no `docs` field")]
    MissingDocs,
    /// Something other than whitespace or `;` follows the index object.
    #[error("unexpected content after search index at byte {offset}")]
    TrailingContent { offset: usize },
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CodecError {
    pub(crate) fn json(source: serde_json::Error) -> Self {
        Self::Json {
            line: source.line(),
            column: source.column(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Error returned when loading `docs.toml` or the docstring registry fails.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("duplicate docstring for `{binding}` in {}", .path.display())]
    DuplicateBinding { binding: String, path: PathBuf },
    #[error("{}: `{variable}` is not a valid JavaScript identifier", .path.display())]
    InvalidVariable { variable: String, path: PathBuf },
    #[error("docstring `{binding}` in {} cannot have category `{category}`", .path.display())]
    InvalidCategory {
        binding: String,
        category: String,
        path: PathBuf,
    },
    #[error("invalid binding `{binding}` in {}: expected `Module.name`", .path.display())]
    InvalidBinding { binding: String, path: PathBuf },
}

/// Error returned while expanding a page into index records.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("{page}: no docstring found for `{binding}`")]
    UnknownBinding { page: String, binding: String },
    #[error("{page}: @autodocs block is missing `Modules = [...]`")]
    AutodocsWithoutModules { page: String },
    #[error("{page}: unknown category `{category}` in @autodocs Order")]
    UnknownOrder { page: String, category: String },
    #[error("{page}: malformed line in @{block} block: `{line}`")]
    MalformedAtBlock {
        page: String,
        block: String,
        line: String,
    },
}
