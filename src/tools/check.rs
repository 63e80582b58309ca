use crate::codec;
use crate::index::{SearchIndex, Validation};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

/// Result of checking an index file
#[derive(Debug)]
pub struct CheckReport {
    pub index: SearchIndex,
    pub validation: Validation,
}

/// Parse and validate an index file.
///
/// Parse failures are errors; validation findings are only reported.
pub async fn execute_check(path: &Path) -> Result<CheckReport> {
    let index = codec::read_file(path)
        .await
        .with_context(|| format!("Failed to check {}", path.display()))?;
    let validation = index.validate();
    if !validation.is_clean() {
        tracing::debug!(
            "{} has {} validation warnings",
            path.display(),
            validation.warnings.len()
        );
    }
    Ok(CheckReport { index, validation })
}

/// Format counts per page and category followed by any warnings.
pub fn format_check_response(path: &Path, report: &CheckReport) -> String {
    let index = &report.index;
    let mut output = format!("{}: {} records\n\n", path.display(), index.len());

    let pages = index.pages();
    let _ = writeln!(output, "Pages ({}):", pages.len());
    for page in pages {
        let _ = writeln!(output, "  • {}", page);
    }
    output.push('\n');

    let _ = writeln!(output, "Categories:");
    for (category, count) in index.category_counts() {
        let _ = writeln!(output, "  • {:<14} {}", category.as_str(), count);
    }

    if report.validation.is_clean() {
        output.push_str("\nNo problems found.\n");
    } else {
        let _ = writeln!(
            output,
            "\nWarnings ({}):",
            report.validation.warnings.len()
        );
        for warning in &report.validation.warnings {
            let _ = writeln!(output, "  - {}", warning);
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const INDEX: &str = r##"var documenterSearchIndex = {"docs":
[{"location":"","page":"Home","title":"Home","text":"CurrentModule = WienerDiffusionModel","category":"page"},{"location":"#WienerDiffusionModel","page":"Home","title":"WienerDiffusionModel","text":"","category":"section"},{"location":"","page":"Home","title":"Home","text":"Documentation for WienerDiffusionModel.","category":"page"}]
}"##;

    #[tokio::test]
    async fn test_check_reports_counts_and_duplicates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("search_index.js");
        std::fs::write(&path, INDEX).unwrap();

        let report = execute_check(&path).await.unwrap();
        assert_eq!(report.index.len(), 3);
        assert_eq!(report.validation.warnings.len(), 1);

        let output = format_check_response(&path, &report);
        assert!(output.contains("3 records"));
        assert!(output.contains("Pages (1):"));
        assert!(output.contains("section"));
        assert!(output.contains("Warnings (1):"));
    }

    #[tokio::test]
    async fn test_check_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("search_index.js");
        std::fs::write(&path, "var x = {\"docs\": [{\"location\": \"\"}]}").unwrap();

        let result = execute_check(&path).await;
        assert!(result.is_err());
        assert!(format!("{:#}", result.unwrap_err()).contains("invalid search index"));
    }
}
