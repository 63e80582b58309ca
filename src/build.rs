//! Generating the search index from a documentation source tree.

use crate::codec::{self, Format};
use crate::config::{CONFIG_FILE, DocsConfig};
use crate::error::{BuildError, Result};
use crate::fingerprint::{FingerprintBuilder, fingerprint_path, load_fingerprint, save_fingerprint};
use crate::index::SearchIndex;
use crate::record::{Category, DocumentRecord};
use crate::source::{self, AtKind, Block, Docstring, DocstringRegistry, Page, markdown_to_text};
use anyhow::Context;
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Instant;

static KEY_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(.*?)\s*$").expect("key/value pattern is valid")
});

/// Category order `@autodocs` uses when no `Order` is given.
const DEFAULT_ORDER: [Category; 6] = [
    Category::Module,
    Category::Constant,
    Category::Type,
    Category::AbstractType,
    Category::Function,
    Category::Macro,
];

/// Anchor used for a heading whose text leaves nothing to slugify.
const FALLBACK_ANCHOR: &str = "section";

/// Turns heading text into an anchor: whitespace runs become `-`, anything
/// but alphanumerics, `-`, `_` and `.` is dropped.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.trim().chars() {
        if c.is_whitespace() {
            pending_dash = true;
        } else if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        }
    }
    if slug.is_empty() {
        slug.push_str(FALLBACK_ANCHOR);
    }
    slug
}

/// Anchors handed out on one page, shared by headings and docstrings.
/// A taken anchor gets the first free `-1`, `-2`, ... suffix.
#[derive(Debug, Default)]
struct Anchors {
    claimed: HashSet<String>,
}

impl Anchors {
    fn claim(&mut self, base: &str) -> String {
        let mut anchor = base.to_string();
        let mut n = 0;
        while self.claimed.contains(&anchor) {
            n += 1;
            anchor = format!("{}-{}", base, n);
        }
        self.claimed.insert(anchor.clone());
        anchor
    }
}

/// Parses the `Key = value` entries of an at-block body.
///
/// Indented lines and lines without `=` continue the previous value, so
/// `DocTestSetup = quote ... end` stays one entry.
fn key_values<'a>(
    page: &Page,
    kind: &AtKind,
    body: &'a str,
) -> std::result::Result<Vec<(&'a str, String)>, BuildError> {
    let mut entries: Vec<(&'a str, String)> = Vec::new();
    for line in body.lines() {
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        let indented = line.starts_with(char::is_whitespace);
        let entry = KEY_VALUE
            .captures(line)
            .filter(|_| !indented || entries.is_empty())
            .and_then(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())));
        if let Some((key, value)) = entry {
            entries.push((key, value.to_string()));
        } else if let Some((_, value)) = entries.last_mut() {
            value.push('\n');
            value.push_str(line.trim_end());
        } else {
            return Err(BuildError::MalformedAtBlock {
                page: page.title.clone(),
                block: kind.name().to_string(),
                line: line.trim().to_string(),
            });
        }
    }
    Ok(entries)
}

/// Splits `[A, B]` (brackets optional) into its elements.
fn list_value(value: &str) -> Vec<String> {
    value
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Accumulates records page by page.
///
/// Tracks which docstrings were already emitted so a binding pulled in by
/// more than one `@docs`/`@autodocs` block is indexed once.
pub struct IndexBuilder<'r> {
    registry: &'r DocstringRegistry,
    strict: bool,
    emitted: HashSet<String>,
    anchors: Anchors,
    index: SearchIndex,
}

impl<'r> IndexBuilder<'r> {
    pub fn new(registry: &'r DocstringRegistry, strict: bool) -> Self {
        Self {
            registry,
            strict,
            emitted: HashSet::new(),
            anchors: Anchors::default(),
            index: SearchIndex::new(),
        }
    }

    pub fn add_page(&mut self, page: &Page) -> std::result::Result<(), BuildError> {
        self.anchors = Anchors::default();
        let mut current_module: Option<String> = None;

        // Every page is findable, even one with no content yet.
        if page.blocks.is_empty() {
            self.index
                .push(DocumentRecord::page_text(&page.url, &page.title, String::new()));
        }

        for block in &page.blocks {
            match block {
                Block::Heading(text) => {
                    let anchor = self.anchors.claim(&slugify(text));
                    self.index.push(DocumentRecord::section(
                        format!("{}#{}", page.url, anchor),
                        &page.title,
                        text.clone(),
                    ));
                }
                Block::Text(text) => {
                    self.index
                        .push(DocumentRecord::page_text(&page.url, &page.title, text.clone()));
                }
                Block::At { kind, body } => {
                    self.index.push(DocumentRecord::page_text(
                        &page.url,
                        &page.title,
                        body.trim().to_string(),
                    ));
                    match kind {
                        AtKind::Meta => {
                            for (key, value) in key_values(page, kind, body)? {
                                match key {
                                    "CurrentModule" => current_module = Some(value),
                                    other => tracing::debug!(
                                        "{}: ignoring @meta key `{}`",
                                        page.title,
                                        other
                                    ),
                                }
                            }
                        }
                        AtKind::Docs => self.expand_docs(page, body, current_module.as_deref())?,
                        AtKind::Autodocs => self.expand_autodocs(page, kind, body)?,
                        _ => {}
                    }
                }
            }
        }

        tracing::debug!("Indexed page '{}' ({})", page.title, page.file.display());
        Ok(())
    }

    fn expand_docs(
        &mut self,
        page: &Page,
        body: &str,
        current_module: Option<&str>,
    ) -> std::result::Result<(), BuildError> {
        for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
            // `f(x::Int)` selects a method of `f`; the registry is keyed by binding.
            let binding = line.split('(').next().unwrap_or(line).trim();
            let registry = self.registry;
            match registry.resolve(binding, current_module) {
                Some(docstring) => self.emit(page, docstring),
                None if self.strict => {
                    return Err(BuildError::UnknownBinding {
                        page: page.title.clone(),
                        binding: binding.to_string(),
                    });
                }
                None => {
                    tracing::warn!(
                        "{}: no docstring found for `{}`, skipping",
                        page.title,
                        binding
                    );
                }
            }
        }
        Ok(())
    }

    fn expand_autodocs(
        &mut self,
        page: &Page,
        kind: &AtKind,
        body: &str,
    ) -> std::result::Result<(), BuildError> {
        let mut modules = None;
        let mut order: Vec<Category> = DEFAULT_ORDER.to_vec();

        for (key, value) in key_values(page, kind, body)? {
            match key {
                "Modules" => modules = Some(list_value(&value)),
                "Order" => {
                    order = list_value(&value)
                        .iter()
                        .map(|symbol| {
                            Category::from_order_symbol(symbol).ok_or_else(|| {
                                BuildError::UnknownOrder {
                                    page: page.title.clone(),
                                    category: symbol.clone(),
                                }
                            })
                        })
                        .collect::<std::result::Result<_, _>>()?;
                }
                "Public" | "Private" | "Pages" | "Filter" => {
                    tracing::debug!("{}: ignoring @autodocs option `{}`", page.title, key);
                }
                other => {
                    tracing::warn!("{}: unknown @autodocs option `{}`", page.title, other);
                }
            }
        }

        let modules = modules.ok_or_else(|| BuildError::AutodocsWithoutModules {
            page: page.title.clone(),
        })?;

        let registry = self.registry;
        let mut selected: Vec<&Docstring> = registry
            .in_modules(&modules)
            .filter(|d| order.contains(&d.category))
            .collect();
        // Stable: registry order is kept within a category.
        selected.sort_by_key(|d| order.iter().position(|c| c == &d.category));

        for docstring in selected {
            self.emit(page, docstring);
        }
        Ok(())
    }

    fn emit(&mut self, page: &Page, docstring: &Docstring) {
        if !self.emitted.insert(docstring.binding.clone()) {
            tracing::warn!(
                "{}: `{}` is already documented elsewhere, skipping",
                page.title,
                docstring.binding
            );
            return;
        }
        let anchor = self.anchors.claim(&docstring.binding);
        self.index.push(DocumentRecord::new(
            format!("{}#{}", page.url, anchor),
            &page.title,
            docstring.binding.clone(),
            markdown_to_text(&docstring.text),
            docstring.category.clone(),
        ));
    }

    pub fn finish(self) -> SearchIndex {
        self.index
    }
}

/// Builds the index for already-parsed pages.
pub fn build_index(
    pages: &[Page],
    registry: &DocstringRegistry,
    strict: bool,
) -> std::result::Result<SearchIndex, BuildError> {
    let mut builder = IndexBuilder::new(registry, strict);
    for page in pages {
        builder.add_page(page)?;
    }
    Ok(builder.finish())
}

/// Options for [`build_site`] beyond what `docs.toml` holds.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Overrides `output` from `docs.toml`.
    pub output: Option<PathBuf>,
    /// Overrides the format implied by the output extension.
    pub format: Option<Format>,
    /// Rebuild even if the fingerprint matches.
    pub force: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Written { path: PathBuf, records: usize },
    /// Sources unchanged since the last build.
    UpToDate { path: PathBuf },
}

/// Builds the search index of the documentation tree at `root` and writes it.
pub async fn build_site(root: &Path, options: &BuildOptions) -> Result<BuildOutcome> {
    let start = Instant::now();
    let config = DocsConfig::load(root).await?;

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| root.join(&config.output));
    let format = options
        .format
        .unwrap_or_else(|| Format::from_path(&output, false));

    let pages = source::load_pages(root, &config).await?;
    let registry = match config.docstrings_path(root) {
        Some(path) => DocstringRegistry::load(&path).await?,
        None => DocstringRegistry::default(),
    };
    if registry.is_empty() {
        tracing::debug!("No docstrings registered for {}", root.display());
    }

    let mut fingerprint = FingerprintBuilder::new();
    fingerprint
        .input(CONFIG_FILE, &format!("{:?}", config))
        .input("format", &format!("{:?}", format));
    for docstring in registry.iter() {
        fingerprint.input(
            &docstring.binding,
            &format!("{}\n{}", docstring.category, docstring.text),
        );
    }
    for page in &pages {
        fingerprint.page(&page.file, &page.content);
    }
    let fingerprint = fingerprint.finish();
    let fingerprint_file = fingerprint_path(&output);

    if !options.force
        && output.is_file()
        && load_fingerprint(&fingerprint_file).as_ref() == Some(&fingerprint)
    {
        tracing::info!("Search index {} is up to date", output.display());
        return Ok(BuildOutcome::UpToDate { path: output });
    }

    let parsed: Vec<Page> = pages
        .iter()
        .map(|page| page.parse(config.pretty_urls))
        .collect();
    let index = build_index(&parsed, &registry, config.strict)?;

    codec::write_file(&output, &index, format, &config.variable)
        .await
        .with_context(|| format!("Failed to write search index {}", output.display()))?;
    if let Err(e) = save_fingerprint(&fingerprint_file, &fingerprint) {
        tracing::warn!(
            "Failed to save fingerprint {}: {}",
            fingerprint_file.display(),
            e
        );
    }

    tracing::info!(
        "Indexed {} pages into {} records at {} in {:?}",
        parsed.len(),
        index.len(),
        output.display(),
        start.elapsed()
    );

    Ok(BuildOutcome::Written {
        path: output,
        records: index.len(),
    })
}
