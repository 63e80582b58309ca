use crate::build::{BuildOptions, BuildOutcome, build_site};
use anyhow::{Result, anyhow};
use std::path::PathBuf;

/// Parameters for the build command
#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
    /// Documentation source root (directory holding `docs.toml`)
    pub root: PathBuf,
    pub options: BuildOptions,
}

/// Build the search index for a documentation source tree.
pub async fn execute_build(request: BuildRequest) -> Result<BuildOutcome> {
    if !request.root.is_dir() {
        return Err(anyhow!(
            "Documentation root is not a directory: {}",
            request.root.display()
        ));
    }
    build_site(&request.root, &request.options).await
}

/// Format a one-line summary of a build.
pub fn format_build_response(outcome: &BuildOutcome) -> String {
    match outcome {
        BuildOutcome::Written { path, records } => {
            format!("Wrote {} records to {}\n", records, path.display())
        }
        BuildOutcome::UpToDate { path } => {
            format!("{} is up to date (use --force to rebuild)\n", path.display())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_missing_root() {
        let request = BuildRequest {
            root: PathBuf::from("/nonexistent/docs"),
            options: BuildOptions::default(),
        };

        let result = execute_build(request).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not a directory"));
    }

    #[test]
    fn test_format_build_response() {
        let written = BuildOutcome::Written {
            path: PathBuf::from("build/search_index.js"),
            records: 6,
        };
        assert_eq!(
            format_build_response(&written),
            "Wrote 6 records to build/search_index.js\n"
        );

        let skipped = BuildOutcome::UpToDate {
            path: PathBuf::from("build/search_index.js"),
        };
        assert!(format_build_response(&skipped).contains("up to date"));
    }
}
