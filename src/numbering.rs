//! The heading numbering engine.
//!
//! A pass walks the headings of a surface in document order with a six-slot counter vector.
//! Visiting a heading resets every deeper slot and bumps its own, and the label is read off the
//! slots from the start level down to the heading's level. Each heading is then overwritten with
//! its label followed by its clean text, so running a pass twice never stacks labels.

use crate::heading::{Fragment, HeadingNode, Level};
use crate::surface::Surface;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static NUMBER_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+(?:\.\d+)*\.\s*").expect("number prefix pattern is valid"));

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// How a label renders the slot of a level that was skipped (an H3 directly under an H1).
///
/// Every visit zeroes all deeper slots, so a skipped level always holds zero.
pub enum SkipPolicy {
    /// Drop zero segments: `[H1, H3]` gives `1.` and `1.1.`.
    #[default]
    Collapse,
    /// Keep zero segments: `[H1, H3]` gives `1.` and `1.0.1.`.
    ZeroFill,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which headings take part in a pass and how their labels render.
pub struct NumberingOptions {
    /// Shallowest level that is numbered.
    pub start_level: Level,
    /// Whether H1 headings are numbered when the start level is 1.
    pub include_top_level: bool,
    /// Rendering of skipped levels.
    pub skip_policy: SkipPolicy,
}

impl Default for NumberingOptions {
    fn default() -> Self {
        Self {
            start_level: Level::TOP,
            include_top_level: true,
            skip_policy: SkipPolicy::Collapse,
        }
    }
}

impl NumberingOptions {
    #[must_use]
    /// Whether a heading at `level` is numbered at all.
    pub fn includes(&self, level: Level) -> bool {
        level >= self.start_level && (self.include_top_level || level != Level::TOP)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Per-level running tally for one pass.
pub struct CounterVector([u32; 6]);

impl CounterVector {
    /// Records a heading at `level`: deeper slots reset, own slot increments.
    pub fn visit(&mut self, level: Level) {
        let slot = level.slot();
        for deeper in &mut self.0[slot + 1..] {
            *deeper = 0;
        }
        self.0[slot] += 1;
    }

    #[must_use]
    /// The slot values for levels 1..=6.
    pub fn slots(&self) -> [u32; 6] {
        self.0
    }

    #[must_use]
    /// Label for a heading at `level` that was just visited.
    ///
    /// Levels shallower than `start` are never numbered and get an empty label.
    pub fn label(&self, start: Level, level: Level, policy: SkipPolicy) -> String {
        if level < start {
            return String::new();
        }
        let parts: Vec<String> = self.0[start.slot()..=level.slot()]
            .iter()
            .filter(|n| policy == SkipPolicy::ZeroFill || **n > 0)
            .map(u32::to_string)
            .collect();
        format!("{}. ", parts.join("."))
    }
}

#[must_use]
/// Computes a label for each level in order, `None` where the heading is excluded.
///
/// Excluded headings leave the counters untouched.
pub fn compute_labels(levels: &[Level], options: &NumberingOptions) -> Vec<Option<String>> {
    let mut counters = CounterVector::default();
    levels
        .iter()
        .map(|&level| {
            if !options.includes(level) {
                return None;
            }
            counters.visit(level);
            Some(counters.label(options.start_level, level, options.skip_policy))
        })
        .collect()
}

#[must_use]
/// Removes one leading `1.2.3. ` style prefix, leaving anything else alone.
pub fn strip_leading_numbering(text: &str) -> &str {
    match NUMBER_PREFIX.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

#[must_use]
/// The heading's authored text: scaffolding dropped, trimmed, stale number prefix removed.
pub fn clean_text(heading: &HeadingNode) -> String {
    let raw: String = heading
        .fragments
        .iter()
        .filter(|f| !matches!(f, Fragment::Scaffold(_)))
        .map(Fragment::as_str)
        .collect();
    strip_leading_numbering(raw.trim()).to_string()
}

#[must_use]
/// Replacement content for a heading: a label span if `label` is non-empty, then the text.
///
/// With no text to follow, the label loses its trailing space.
pub fn render(label: &str, clean: &str) -> Vec<Fragment> {
    let mut content = Vec::with_capacity(2);
    let label = if clean.is_empty() { label.trim_end() } else { label };
    if !label.is_empty() {
        content.push(Fragment::Label(label.to_string()));
    }
    content.push(Fragment::Text(clean.to_string()));
    content
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// What a pass would write for one heading.
pub struct OutlineEntry {
    /// Position of the heading on its surface.
    pub index: usize,
    /// Outline depth.
    pub level: Level,
    /// Assigned label, absent for excluded headings.
    pub label: Option<String>,
    /// Authored text without any numbering.
    pub text: String,
}

#[must_use]
/// Labels and clean text for every heading, without touching the surface.
pub fn outline(headings: &[HeadingNode], options: &NumberingOptions) -> Vec<OutlineEntry> {
    let levels: Vec<Level> = headings.iter().map(|h| h.level).collect();
    compute_labels(&levels, options)
        .into_iter()
        .zip(headings)
        .map(|(label, heading)| OutlineEntry {
            index: heading.index,
            level: heading.level,
            label,
            text: clean_text(heading),
        })
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
/// Tally of one pass over a surface.
pub struct PassReport {
    /// Headings rewritten with a label.
    pub numbered: usize,
    /// Headings rewritten to plain text.
    pub cleared: usize,
    /// Headings left alone because their level is excluded.
    pub skipped: usize,
    /// Headings the surface refused to overwrite.
    pub failed: usize,
}

/// Numbers every included heading on the surface.
///
/// Excluded headings are left exactly as they are. A heading the surface refuses to overwrite is
/// logged and counted; the rest of the pass still runs.
pub fn renumber<S: Surface + ?Sized>(surface: &mut S, options: &NumberingOptions) -> PassReport {
    let headings = surface.headings();
    let mut report = PassReport::default();

    for entry in outline(&headings, options) {
        let Some(label) = entry.label else {
            report.skipped += 1;
            continue;
        };
        match surface.overwrite(entry.index, &render(&label, &entry.text)) {
            Ok(()) => report.numbered += 1,
            Err(e) => {
                tracing::warn!(index = entry.index, error = %e, "could not number heading");
                report.failed += 1;
            }
        }
    }

    tracing::debug!(?report, "renumber pass complete");
    report
}

/// Strips numbering from every heading on the surface, whatever its level.
pub fn remove_all<S: Surface + ?Sized>(surface: &mut S) -> PassReport {
    let headings = surface.headings();
    let mut report = PassReport::default();

    for heading in &headings {
        let clean = clean_text(heading);
        match surface.overwrite(heading.index, &render("", &clean)) {
            Ok(()) => report.cleared += 1,
            Err(e) => {
                tracing::warn!(index = heading.index, error = %e, "could not clear heading");
                report.failed += 1;
            }
        }
    }

    tracing::debug!(?report, "remove pass complete");
    report
}

#[cfg(test)]
#[path = "tests/numbering.rs"]
mod tests;
