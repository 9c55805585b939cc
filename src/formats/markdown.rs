//! Markdown format implementation using tree-sitter-md.
//!
//! This module provides the heading query for ATX (`#`) and setext (underlined) headings and a
//! [`MarkdownDocument`] surface that rewrites heading lines in the source text. Numbering labels
//! live inline in the heading text. A closing `#` sequence or a setext underline is scaffolding.
//!
//! A setext heading whose content changes is written back in ATX form: `1. Title` above an
//! underline would otherwise open an ordered list.

use crate::error::{Error, Result};
use crate::formats::Format;
use crate::heading::{Fragment, HeadingNode, Level};
use crate::numbering::strip_leading_numbering;
use crate::surface::Surface;
use std::fs;
use std::path::Path;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// Tree-sitter queries for ATX and setext markdown headings.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn heading_query(&self) -> &'static str {
        "[(atx_heading) (setext_heading)] @heading"
    }

    fn file_extension(&self) -> &'static str {
        "md"
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Style {
    Atx,
    Setext,
}

#[derive(Clone, Debug)]
/// Byte coordinates of one heading in the source.
struct HeadingSpan {
    level: Level,
    style: Style,
    /// Where the heading node begins, after any container prefix such as `> `.
    marker_start: usize,
    /// First byte after the marker and its following whitespace.
    content_start: usize,
    /// Where authored text stops and any closing sequence or underline begins.
    text_end: usize,
    /// End of the last line, excluding the line break.
    content_end: usize,
}

impl HeadingSpan {
    fn shift(&mut self, grown: usize, shrunk: usize) {
        for offset in [
            &mut self.marker_start,
            &mut self.content_start,
            &mut self.text_end,
            &mut self.content_end,
        ] {
            *offset = *offset + grown - shrunk;
        }
    }
}

/// A Markdown source text whose ATX headings can be read and rewritten in place.
pub struct MarkdownDocument {
    source: String,
    spans: Vec<HeadingSpan>,
    modified: bool,
}

impl MarkdownDocument {
    /// Parses `source` and locates its headings.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or tree-sitter produces no tree.
    pub fn parse(source: impl Into<String>) -> Result<Self> {
        Self::parse_with(&MarkdownFormat, source)
    }

    /// Parses `source` using the grammar and query of `format`.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar or query is rejected, or parsing produces no tree.
    pub fn parse_with(format: &dyn Format, source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let language = format.language();

        let mut parser = Parser::new();
        parser.set_language(&language)?;
        let tree = parser.parse(&source, None).ok_or(Error::Parse)?;

        let query = Query::new(&language, format.heading_query())?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());

        let mut spans = Vec::new();
        while let Some(m) = matches.next() {
            for capture in m.captures {
                let node = capture.node;
                let level = marker_level(&node, &source);
                let span = match underline_start(&node) {
                    Some(underline) => analyse_setext(&source, node.start_byte(), underline, level),
                    None => analyse_line(&source, node.start_byte(), level),
                };
                spans.push(span);
            }
        }
        spans.sort_by_key(|s| s.marker_start);
        spans.dedup_by_key(|s| s.marker_start);

        tracing::debug!(headings = spans.len(), "parsed markdown document");
        Ok(Self {
            source,
            spans,
            modified: false,
        })
    }

    /// Reads and parses the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        Self::parse(fs::read_to_string(path)?)
    }

    /// Writes the current source to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.source)?;
        Ok(())
    }

    #[must_use]
    /// The document text including every overwrite so far.
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    /// Consumes the document, returning its text.
    pub fn into_source(self) -> String {
        self.source
    }

    #[must_use]
    /// Whether any overwrite changed the text.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Authored text of a heading on one line.
    fn text_of(&self, span: &HeadingSpan) -> String {
        let raw = &self.source[span.content_start..span.text_end];
        match span.style {
            Style::Atx => raw.to_string(),
            Style::Setext => raw.lines().map(str::trim).collect::<Vec<_>>().join(" "),
        }
    }
}

impl Surface for MarkdownDocument {
    fn headings(&self) -> Vec<HeadingNode> {
        self.spans
            .iter()
            .enumerate()
            .map(|(index, span)| {
                let text = self.text_of(span);
                let rest = strip_leading_numbering(&text);
                let label = &text[..text.len() - rest.len()];

                let mut fragments = Vec::with_capacity(3);
                if !label.is_empty() {
                    fragments.push(Fragment::Label(label.to_string()));
                }
                fragments.push(Fragment::Text(rest.to_string()));
                if span.text_end < span.content_end {
                    fragments.push(Fragment::Scaffold(
                        self.source[span.text_end..span.content_end].to_string(),
                    ));
                }

                HeadingNode {
                    index,
                    level: span.level,
                    fragments,
                }
            })
            .collect()
    }

    fn overwrite(&mut self, index: usize, content: &[Fragment]) -> Result<()> {
        let len = self.spans.len();
        let span = self
            .spans
            .get(index)
            .cloned()
            .ok_or(Error::NoSuchHeading { index, len })?;

        // A heading is one line: any line break in the new content would split it.
        let mut inline: String = content
            .iter()
            .map(Fragment::as_str)
            .collect::<String>()
            .replace(['\r', '\n'], " ");

        let (range, replacement) = match span.style {
            Style::Atx => {
                let marker_has_gap = self.source[span.marker_start..span.content_start]
                    .ends_with(|c: char| c.is_whitespace());
                if !marker_has_gap && !inline.is_empty() {
                    inline.insert(0, ' ');
                }
                if self.source[span.content_start..span.content_end] == inline {
                    return Ok(());
                }
                (span.content_start..span.content_end, inline)
            }
            Style::Setext => {
                if self.text_of(&span) == inline {
                    return Ok(());
                }
                let marker = "#".repeat(usize::from(span.level.get()));
                let line = if inline.is_empty() {
                    marker
                } else {
                    format!("{marker} {inline}")
                };
                (span.marker_start..span.content_end, line)
            }
        };
        let (grown, shrunk) = (replacement.len(), range.len());
        self.source.replace_range(range, &replacement);

        self.spans[index] = analyse_line(&self.source, span.marker_start, span.level);
        for later in &mut self.spans[index + 1..] {
            later.shift(grown, shrunk);
        }
        self.modified = true;
        Ok(())
    }
}

/// Level from the `atx_hN_marker` or setext underline child, falling back to counting `#`.
fn marker_level(node: &Node, source: &str) -> Level {
    let mut walker = node.walk();
    let from_kind = node
        .children(&mut walker)
        .find_map(|child| level_from_kind(child.kind()));
    let level = from_kind.unwrap_or_else(|| {
        let hashes = source[node.start_byte()..]
            .trim_start_matches([' ', '\t'])
            .chars()
            .take_while(|c| *c == '#')
            .count();
        i64::try_from(hashes).unwrap_or(i64::MAX)
    });
    Level::clamped(level)
}

fn level_from_kind(kind: &str) -> Option<i64> {
    match kind {
        "setext_h1_underline" => Some(1),
        "setext_h2_underline" => Some(2),
        _ => kind
            .strip_prefix("atx_h")?
            .strip_suffix("_marker")?
            .parse()
            .ok(),
    }
}

fn underline_start(node: &Node) -> Option<usize> {
    if node.kind() != "setext_heading" {
        return None;
    }
    let mut walker = node.walk();
    let underline = node
        .children(&mut walker)
        .find(|child| child.kind().ends_with("_underline"))
        .map(|child| child.start_byte());
    underline
}

/// Locates the text lines and underline of the setext heading starting at `at`.
fn analyse_setext(source: &str, at: usize, underline: usize, level: Level) -> HeadingSpan {
    let text_end = source[..underline].rfind('\n').map_or(at, |i| i.max(at));
    let text = source[at..text_end].trim_end();
    let content_start = at + (text.len() - text.trim_start().len());

    let line_end = source[underline..]
        .find('\n')
        .map_or(source.len(), |i| underline + i);
    let content_end = underline + source[underline..line_end].trim_end_matches('\r').len();

    HeadingSpan {
        level,
        style: Style::Setext,
        marker_start: content_start,
        content_start,
        text_end: at + text.len(),
        content_end,
    }
}

/// Locates marker, text and closing sequence of the heading starting at `at`.
fn analyse_line(source: &str, at: usize, level: Level) -> HeadingSpan {
    let line_end = source[at..].find('\n').map_or(source.len(), |i| at + i);
    let line = source[at..line_end].trim_end_matches('\r');
    let content_end = at + line.len();

    let after_indent = line.trim_start_matches(' ');
    let after_marker = after_indent.trim_start_matches('#');
    let content = after_marker.trim_start_matches([' ', '\t']);
    let content_start = content_end - content.len();

    let trimmed = content.trim_end_matches([' ', '\t']);
    let before_closing = trimmed.trim_end_matches('#');
    let text = if before_closing.len() < trimmed.len()
        && (before_closing.is_empty() || before_closing.ends_with([' ', '\t']))
    {
        before_closing.trim_end_matches([' ', '\t'])
    } else {
        trimmed
    };

    HeadingSpan {
        level,
        style: Style::Atx,
        marker_start: at,
        content_start,
        text_end: content_start + text.len(),
        content_end,
    }
}

#[cfg(test)]
#[path = "../tests/markdown.rs"]
mod tests;
