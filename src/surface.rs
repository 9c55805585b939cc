//! The capability a document must offer for its headings to be numbered.
//!
//! Keeping the surface behind a trait leaves the numbering engine pure: it reads an ordered
//! snapshot of headings and hands back whole replacement content, and how that content is
//! located or written is entirely the implementor's business.

use crate::error::Result;
use crate::heading::{Fragment, HeadingNode};

/// An editable document exposing its headings in document order.
pub trait Surface {
    /// Ordered snapshot of every heading on the surface.
    fn headings(&self) -> Vec<HeadingNode>;

    /// Replaces the rendered content of the heading at `index` with exactly `content`.
    ///
    /// This is a full overwrite: nothing of the previous content survives unless it is part of
    /// `content`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` does not name a heading or the surface refuses the write.
    fn overwrite(&mut self, index: usize, content: &[Fragment]) -> Result<()>;
}
