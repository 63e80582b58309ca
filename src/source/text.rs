//! Flattening markdown to the plain text stored in index records.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

pub(crate) fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

/// Converts markdown to plain text.
///
/// Inline formatting is dropped and code is kept as written. Paragraphs and
/// headings are separated by a blank line, list items are one per line, and
/// soft breaks become spaces. Raw HTML is dropped.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    let mut item_depth = 0usize;
    let mut in_code_block = false;

    for event in Parser::new_ext(markdown, parser_options()) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak => out.push(if in_code_block { '\n' } else { ' ' }),
            Event::HardBreak => out.push('\n'),
            Event::Start(Tag::Item) => {
                item_depth += 1;
                ensure_newline(&mut out);
            }
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
                ensure_newline(&mut out);
            }
            Event::End(TagEnd::Item) => {
                item_depth = item_depth.saturating_sub(1);
                ensure_newline(&mut out);
            }
            Event::End(TagEnd::Paragraph) => {
                if item_depth > 0 {
                    ensure_newline(&mut out);
                } else {
                    end_block(&mut out);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                end_block(&mut out);
            }
            Event::End(TagEnd::Heading(_) | TagEnd::BlockQuote(_) | TagEnd::Table) => {
                end_block(&mut out);
            }
            Event::End(TagEnd::List(_)) if item_depth == 0 => end_block(&mut out),
            Event::End(TagEnd::TableHead | TagEnd::TableRow) => ensure_newline(&mut out),
            Event::End(TagEnd::TableCell) => out.push(' '),
            _ => {}
        }
    }

    out.trim().to_string()
}

fn ensure_newline(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn end_block(out: &mut String) {
    if out.is_empty() {
        return;
    }
    ensure_newline(out);
    if !out.ends_with("\n\n") {
        out.push('\n');
    }
}
