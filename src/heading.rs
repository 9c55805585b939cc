//! Heading representation shared by the numbering engine and every surface.
//!
//! A heading is an ordered element of a document with an outline level and rendered content.
//! The content is kept as fragments so that a numbering label written by a previous pass, the
//! author's text, and decorative scaffolding that belongs to neither can be told apart.

use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
/// Outline depth of a heading, always within 1..=6.
pub struct Level(u8);

impl Level {
    /// Shallowest level (H1).
    pub const TOP: Self = Self(1);
    /// Deepest level (H6).
    pub const DEEPEST: Self = Self(6);

    #[must_use]
    /// Builds a level from whatever the surface reported, clamping to the nearest bound.
    pub fn clamped(raw: i64) -> Self {
        Self(u8::try_from(raw.clamp(1, 6)).unwrap_or(1))
    }

    #[must_use]
    /// Returns the level only if it is already in range.
    pub fn new(raw: u8) -> Option<Self> {
        (1..=6).contains(&raw).then_some(Self(raw))
    }

    #[must_use]
    /// The level as a plain number.
    pub fn get(self) -> u8 {
        self.0
    }

    #[must_use]
    /// Zero-based slot of this level in a counter vector.
    pub fn slot(self) -> usize {
        usize::from(self.0) - 1
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::TOP
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One piece of a heading's rendered content.
pub enum Fragment {
    /// Numbering span written by a renumber pass, e.g. `"2.1. "`.
    Label(String),
    /// Authored text.
    Text(String),
    /// Decorative content that is not part of the author's text.
    Scaffold(String),
}

impl Fragment {
    #[must_use]
    /// The fragment's text regardless of kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Label(s) | Self::Text(s) | Self::Scaffold(s) => s,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Snapshot of a heading as read from a surface.
pub struct HeadingNode {
    /// Position of the heading among all headings on its surface.
    pub index: usize,
    /// Outline depth.
    pub level: Level,
    /// Rendered content in display order.
    pub fragments: Vec<Fragment>,
}

impl HeadingNode {
    #[must_use]
    /// Creates a heading whose content is a single text fragment.
    pub fn new(index: usize, level: Level, text: impl Into<String>) -> Self {
        Self {
            index,
            level,
            fragments: vec![Fragment::Text(text.into())],
        }
    }

    #[must_use]
    /// Everything the heading currently displays, scaffolding included.
    pub fn display_text(&self) -> String {
        self.fragments.iter().map(Fragment::as_str).collect()
    }

    #[must_use]
    /// The label span currently present, if a previous pass wrote one.
    pub fn label(&self) -> Option<&str> {
        self.fragments.iter().find_map(|f| match f {
            Fragment::Label(s) => Some(s.as_str()),
            _ => None,
        })
    }
}
