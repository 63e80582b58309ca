use crate::codec::{self, DEFAULT_VARIABLE, Format};
use anyhow::{Context, Result, bail};
use std::path::PathBuf;

/// Parameters for the convert command
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Indent JSON output
    pub pretty: bool,
    /// Variable for JavaScript output. Defaults to the one the input assigns.
    pub variable: Option<String>,
}

/// Rewrite an index between the JavaScript and JSON layouts.
///
/// The output layout follows the output file's extension. Returns the number
/// of records written.
pub async fn execute_convert(request: ConvertRequest) -> Result<usize> {
    if let Some(variable) = &request.variable
        && !codec::is_valid_identifier(variable)
    {
        bail!("Invalid JavaScript variable name: {}", variable);
    }

    let (index, assigned) = codec::read_file_with_variable(&request.input)
        .await
        .with_context(|| format!("Failed to read {}", request.input.display()))?;
    let variable = request
        .variable
        .or(assigned)
        .unwrap_or_else(|| DEFAULT_VARIABLE.to_string());

    let format = Format::from_path(&request.output, request.pretty);
    codec::write_file(&request.output, &index, format, &variable)
        .await
        .with_context(|| format!("Failed to write {}", request.output.display()))?;

    tracing::info!(
        "Converted {} records from {} to {}",
        index.len(),
        request.input.display(),
        request.output.display()
    );
    Ok(index.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::SearchIndex;
    use crate::record::DocumentRecord;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_convert_js_to_json_and_back() {
        let dir = TempDir::new().unwrap();
        let index = SearchIndex::from(vec![
            DocumentRecord::page_text("", "Home", "ν, α, τ, z"),
            DocumentRecord::section("#Usage", "Home", "Usage"),
        ]);
        let js = dir.path().join("search_index.js");
        std::fs::write(&js, codec::to_js(&index, DEFAULT_VARIABLE)).unwrap();

        let json = dir.path().join("out/search_index.json");
        let count = execute_convert(ConvertRequest {
            input: js.clone(),
            output: json.clone(),
            pretty: true,
            variable: None,
        })
        .await
        .unwrap();
        assert_eq!(count, 2);

        let written = std::fs::read_to_string(&json).unwrap();
        assert!(written.starts_with("{\n"));
        assert_eq!(codec::parse(&written).unwrap(), index);

        let back = dir.path().join("back.js");
        execute_convert(ConvertRequest {
            input: json,
            output: back.clone(),
            pretty: false,
            variable: None,
        })
        .await
        .unwrap();
        assert_eq!(
            std::fs::read_to_string(back).unwrap(),
            std::fs::read_to_string(js).unwrap()
        );
    }

    #[tokio::test]
    async fn test_convert_keeps_assigned_variable() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.js");
        std::fs::write(&input, "const idx = {\"docs\":[]};\n").unwrap();

        let kept = dir.path().join("kept.js");
        execute_convert(ConvertRequest {
            input: input.clone(),
            output: kept.clone(),
            pretty: false,
            variable: None,
        })
        .await
        .unwrap();
        assert!(std::fs::read_to_string(kept).unwrap().starts_with("var idx = "));

        let renamed = dir.path().join("renamed.js");
        execute_convert(ConvertRequest {
            input: input.clone(),
            output: renamed.clone(),
            pretty: false,
            variable: Some("searchIndex".to_string()),
        })
        .await
        .unwrap();
        assert!(std::fs::read_to_string(renamed).unwrap().starts_with("var searchIndex = "));

        let err = execute_convert(ConvertRequest {
            input,
            output: dir.path().join("bad.js"),
            pretty: false,
            variable: Some("not-valid".to_string()),
        })
        .await
        .unwrap_err();
        assert!(err.to_string().contains("not-valid"));
    }
}
