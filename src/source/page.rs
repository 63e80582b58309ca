//! Splitting a markdown page into the top-level blocks the index is built from.

use super::text::{markdown_to_text, parser_options};
use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag};
use std::path::{Path, PathBuf};

/// Kind of a fenced `@`-block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtKind {
    Meta,
    Docs,
    Autodocs,
    Index,
    Contents,
    Example,
    Repl,
    Setup,
    Eval,
    Other(String),
}

impl AtKind {
    fn from_info(info: &str) -> Option<Self> {
        let name = info.split_whitespace().next()?.strip_prefix('@')?;
        Some(match name {
            "meta" => Self::Meta,
            "docs" => Self::Docs,
            "autodocs" => Self::Autodocs,
            "index" => Self::Index,
            "contents" => Self::Contents,
            "example" => Self::Example,
            "repl" => Self::Repl,
            "setup" => Self::Setup,
            "eval" => Self::Eval,
            other => Self::Other(other.to_string()),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Meta => "meta",
            Self::Docs => "docs",
            Self::Autodocs => "autodocs",
            Self::Index => "index",
            Self::Contents => "contents",
            Self::Example => "example",
            Self::Repl => "repl",
            Self::Setup => "setup",
            Self::Eval => "eval",
            Self::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    /// Any other top-level markdown block, flattened.
    Text(String),
    At { kind: AtKind, body: String },
}

/// A parsed markdown page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    /// Path relative to the source directory.
    pub file: PathBuf,
    /// Location of the page relative to the site root.
    pub url: String,
    pub blocks: Vec<Block>,
}

impl Page {
    /// Parses `content`. Without an explicit `title` the first heading is
    /// used, then the file stem.
    pub fn parse(file: &Path, title: Option<&str>, content: &str, pretty_urls: bool) -> Self {
        let blocks = parse_blocks(content);
        let title = title
            .map(str::to_string)
            .or_else(|| {
                blocks.iter().find_map(|b| match b {
                    Block::Heading(text) => Some(text.clone()),
                    _ => None,
                })
            })
            .unwrap_or_else(|| {
                file.file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default()
            });

        Self {
            title,
            file: file.to_path_buf(),
            url: page_url(file, pretty_urls),
            blocks,
        }
    }
}

/// Site-relative location of a page. The root `index.md` maps to `""`.
pub fn page_url(file: &Path, pretty_urls: bool) -> String {
    let mut segments: Vec<String> = file
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    let is_index = segments.last().is_some_and(|s| s == "index");
    if pretty_urls {
        if is_index {
            segments.pop();
        }
        if segments.is_empty() {
            String::new()
        } else {
            format!("{}/", segments.join("/"))
        }
    } else if is_index && segments.len() == 1 {
        String::new()
    } else {
        format!("{}.html", segments.join("/"))
    }
}

enum Open {
    Heading(String),
    At { kind: AtKind, body: String },
    Other { start: usize, end: usize },
}

/// Splits markdown into top-level blocks in document order.
pub fn parse_blocks(content: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut open: Option<Open> = None;

    for (event, range) in Parser::new_ext(content, parser_options()).into_offset_iter() {
        match event {
            Event::Start(tag) => {
                if depth == 0 {
                    open = Some(match tag {
                        Tag::Heading { .. } => Open::Heading(String::new()),
                        Tag::CodeBlock(CodeBlockKind::Fenced(ref info)) => {
                            match AtKind::from_info(info) {
                                Some(kind) => Open::At {
                                    kind,
                                    body: String::new(),
                                },
                                None => Open::Other {
                                    start: range.start,
                                    end: range.end,
                                },
                            }
                        }
                        _ => Open::Other {
                            start: range.start,
                            end: range.end,
                        },
                    });
                }
                depth += 1;
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0
                    && let Some(block) = open.take().and_then(|o| close(o, content))
                {
                    blocks.push(block);
                }
            }
            Event::Text(text) | Event::Code(text) => match &mut open {
                Some(Open::Heading(buf) | Open::At { body: buf, .. }) => {
                    buf.push_str(&text);
                }
                _ => {}
            },
            Event::SoftBreak | Event::HardBreak => {
                if let Some(Open::Heading(text)) = &mut open {
                    text.push(' ');
                }
            }
            _ => {}
        }
    }

    blocks
}

fn close(open: Open, content: &str) -> Option<Block> {
    match open {
        Open::Heading(text) => Some(Block::Heading(text.trim().to_string())),
        Open::At { kind, body } => Some(Block::At { kind, body }),
        Open::Other { start, end } => {
            let text = markdown_to_text(content.get(start..end)?);
            Some(Block::Text(text))
        }
    }
}
