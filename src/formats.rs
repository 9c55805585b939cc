//! Format trait and implementations for different document types.
//!
//! A format supplies the tree-sitter grammar and the query that captures heading nodes, so a
//! surface can locate headings structurally rather than by scanning lines (which would also
//! catch `#` lines inside fenced code).

pub mod markdown;

/// Grammar and queries needed to find headings in one document type.
pub trait Format {
    /// tree-sitter grammar for the document type.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing each heading node.
    fn heading_query(&self) -> &str;
    /// File suffix this format is usually stored under.
    fn file_extension(&self) -> &str;
}
