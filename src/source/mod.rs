//! Documentation source tree: markdown pages and the docstring registry.

pub mod docstrings;
pub mod page;
pub mod text;

pub use docstrings::{Docstring, DocstringRegistry};
pub use page::{AtKind, Block, Page};
pub use text::markdown_to_text;

use crate::config::DocsConfig;
use crate::error::Result;
use anyhow::Context;
use futures::future::try_join_all;
use std::path::{Path, PathBuf};

/// Raw contents of one page, before parsing.
#[derive(Debug, Clone)]
pub struct PageSource {
    /// Path relative to the source directory.
    pub file: PathBuf,
    pub title: Option<String>,
    pub content: String,
}

impl PageSource {
    pub fn parse(&self, pretty_urls: bool) -> Page {
        Page::parse(&self.file, self.title.as_deref(), &self.content, pretty_urls)
    }
}

/// Finds every markdown file under `dir`, honoring ignore files.
///
/// `index.md` comes first, the rest in lexicographic path order.
pub fn discover_pages(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = ignore::WalkBuilder::new(dir)
        .require_git(false)
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "md"))
        .filter_map(|entry| entry.path().strip_prefix(dir).ok().map(Path::to_path_buf))
        .collect();

    files.sort_by(|a, b| {
        let a_root = a == Path::new("index.md");
        let b_root = b == Path::new("index.md");
        b_root.cmp(&a_root).then_with(|| a.cmp(b))
    });
    files
}

/// Reads every configured page concurrently, in site order.
pub async fn load_pages(root: &Path, config: &DocsConfig) -> Result<Vec<PageSource>> {
    let source_dir = root.join(&config.source);

    let entries: Vec<(PathBuf, Option<String>)> = if config.pages.is_empty() {
        let dir = source_dir.clone();
        let files = tokio::task::spawn_blocking(move || discover_pages(&dir))
            .await
            .context("Page discovery task failed")?;
        tracing::debug!(
            "Discovered {} pages under {}",
            files.len(),
            source_dir.display()
        );
        files.into_iter().map(|file| (file, None)).collect()
    } else {
        config
            .pages
            .iter()
            .map(|entry| (entry.file.clone(), entry.title.clone()))
            .collect()
    };

    try_join_all(entries.into_iter().map(|(file, title)| {
        let path = source_dir.join(&file);
        async move {
            let content = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read page {}", path.display()))?;
            Ok::<_, anyhow::Error>(PageSource {
                file,
                title,
                content,
            })
        }
    }))
    .await
}
