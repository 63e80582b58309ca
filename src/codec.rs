//! Reading and writing search index files.
//!
//! Two layouts are supported:
//!
//! - the embedded form loaded by the site's search script:
//!   `var documenterSearchIndex = {"docs":\n[...]\n}`
//! - bare JSON: `{"docs":[...]}`
//!
//! [`parse`] accepts either. Writers pick the layout from [`Format`].

use crate::error::CodecError;
use crate::index::SearchIndex;
use crate::record::DocumentRecord;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::LazyLock;

/// Variable the search script reads the index from.
pub const DEFAULT_VARIABLE: &str = "documenterSearchIndex";

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?:var|let|const)\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=\s*)?")
        .expect("assignment pattern is valid")
});

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern is valid"));

/// On-disk layout of an index file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// JavaScript variable assignment.
    #[default]
    Js,
    Json { pretty: bool },
}

impl Format {
    /// `.js` files get the assignment layout, everything else JSON.
    pub fn from_path(path: &Path, pretty: bool) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("js") => Self::Js,
            _ => Self::Json { pretty },
        }
    }
}

/// Returns true if `name` can be used as the assigned variable.
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Renders the index as the embedded JavaScript assignment.
///
/// Records are written compactly, one array per index, matching the layout
/// the search script expects.
pub fn to_js(index: &SearchIndex, variable: &str) -> String {
    let mut out = String::with_capacity(64 + index.len() * 128);
    out.push_str("var ");
    out.push_str(variable);
    out.push_str(" = {\"docs\":\n[");
    for (i, record) in index.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&record_json(record));
    }
    out.push_str("]\n}\n");
    out
}

fn record_json(record: &DocumentRecord) -> String {
    // A struct of strings cannot fail to serialize.
    serde_json::to_string(record).unwrap_or_default()
}

/// Renders the index as a JSON object with a single `docs` field.
pub fn to_json(index: &SearchIndex, pretty: bool) -> Result<String, CodecError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(index)
    } else {
        serde_json::to_string(index)
    };
    rendered.map_err(CodecError::json)
}

pub fn render(index: &SearchIndex, format: Format, variable: &str) -> Result<String, CodecError> {
    match format {
        Format::Js => Ok(to_js(index, variable)),
        Format::Json { pretty } => to_json(index, pretty).map(|mut s| {
            s.push('\n');
            s
        }),
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawIndex {
    docs: Option<Vec<DocumentRecord>>,
}

/// Parses either the JavaScript assignment or bare JSON.
pub fn parse(input: &str) -> Result<SearchIndex, CodecError> {
    parse_with_variable(input).map(|(index, _)| index)
}

/// Like [`parse`], also returning the assigned variable name, if any.
pub fn parse_with_variable(input: &str) -> Result<(SearchIndex, Option<String>), CodecError> {
    let (prefix_len, variable) = match ASSIGNMENT.captures(input) {
        Some(caps) => (
            caps.get(0).map_or(0, |m| m.end()),
            caps.get(1).map(|m| m.as_str().to_string()),
        ),
        None => (0, None),
    };
    let (prefix, body) = input.split_at(prefix_len);

    let mut stream = serde_json::Deserializer::from_str(body).into_iter::<RawIndex>();
    let raw = match stream.next() {
        Some(Ok(raw)) => raw,
        Some(Err(e)) => return Err(shift_position(e, prefix)),
        None => return Err(CodecError::MissingDocs),
    };
    let consumed = prefix_len + stream.byte_offset();

    let rest = &input[consumed..];
    let after_value = rest.trim_start();
    let after_semicolon = after_value.strip_prefix(';').unwrap_or(after_value);
    if !after_semicolon.trim().is_empty() {
        let offset = input.len() - after_semicolon.trim_start().len();
        return Err(CodecError::TrailingContent { offset });
    }

    let index = raw.docs.map(SearchIndex::from).ok_or(CodecError::MissingDocs)?;
    Ok((index, variable))
}

/// Reports positions relative to the whole input rather than the JSON body.
fn shift_position(error: serde_json::Error, prefix: &str) -> CodecError {
    let extra_lines = prefix.matches('\n').count();
    let last_line_len = prefix.len() - prefix.rfind('\n').map_or(0, |i| i + 1);
    let mut err = CodecError::json(error);
    if let CodecError::Json { line, column, .. } = &mut err {
        if *line == 1 {
            *column += last_line_len;
        }
        *line += extra_lines;
    }
    err
}

pub async fn read_file(path: &Path) -> Result<SearchIndex, CodecError> {
    read_file_with_variable(path).await.map(|(index, _)| index)
}

pub async fn read_file_with_variable(
    path: &Path,
) -> Result<(SearchIndex, Option<String>), CodecError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CodecError::io(path, e))?;
    let (index, variable) = parse_with_variable(&content)?;
    tracing::debug!("Read {} records from {}", index.len(), path.display());
    Ok((index, variable))
}

/// Writes the index, replacing any existing file in one rename.
pub async fn write_file(
    path: &Path,
    index: &SearchIndex,
    format: Format,
    variable: &str,
) -> Result<(), CodecError> {
    let content = render(index, format, variable)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| CodecError::io(parent, e))?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    tokio::fs::write(&tmp_path, content)
        .await
        .map_err(|e| CodecError::io(&tmp_path, e))?;
    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(CodecError::io(path, e));
    }

    tracing::debug!("Wrote {} records to {}", index.len(), path.display());
    Ok(())
}
