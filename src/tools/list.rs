use crate::codec;
use crate::record::Category;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::PathBuf;

/// Parameters for the list command
#[derive(Debug, Clone)]
pub struct ListRequest {
    pub file: PathBuf,
    /// Only records with this category tag
    pub category: Option<String>,
    /// Only records on this page
    pub page: Option<String>,
}

/// List records as `category<TAB>location<TAB>title`, one per line.
pub async fn execute_list(request: ListRequest) -> Result<String> {
    let index = codec::read_file(&request.file)
        .await
        .with_context(|| format!("Failed to read {}", request.file.display()))?;

    let category = request.category.as_deref().map(Category::from);
    let mut output = String::new();
    for record in index
        .iter()
        .filter(|r| category.as_ref().is_none_or(|c| &r.category == c))
        .filter(|r| request.page.as_deref().is_none_or(|p| r.page == p))
    {
        let _ = writeln!(
            output,
            "{}\t{}\t{}",
            record.category, record.location, record.title
        );
    }

    Ok(output)
}
