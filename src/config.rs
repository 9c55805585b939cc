//! Configuration to acknowledge user preferences as well as set defaults.
//!
//! Specifically, we try to find a headnum.toml, and if present we load settings from there.
//! This provides the numbering options, the floating control placement, the chords, and the
//! timings of the navigation poll and the surface wait.

use crate::heading::Level;
use crate::hotkeys::Keymap;
use crate::numbering::{NumberingOptions, SkipPolicy};
use crate::overlay::OverlaySettings;
use facet::Facet;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "headnum.toml";

#[derive(Facet, Clone, Debug, PartialEq)]
/// User preferences loaded from headnum.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 1)]
    /// Shallowest heading level that is numbered (clamped to 1..=6).
    pub start_level: u8,
    #[facet(default = true)]
    /// Whether H1 headings are numbered when the start level is 1.
    pub include_top_level: bool,
    #[facet(default = true)]
    /// Whether the floating `#` control is shown in edit mode.
    pub show_floating_control: bool,
    #[facet(default = 88)]
    /// Pixels between the top edge and the floating control.
    pub top_offset: u32,
    #[facet(default = 16)]
    /// Pixels between the right edge and the floating control.
    pub right_offset: u32,
    #[facet(default = false)]
    /// Render skipped levels as `0` segments instead of dropping them.
    pub zero_fill_skipped_levels: bool,
    #[facet(default = "ctrl+alt+n".to_string())]
    /// Chord that runs a numbering pass.
    pub renumber_keys: String,
    #[facet(default = "ctrl+alt+shift+n".to_string())]
    /// Chord that strips all numbering.
    pub remove_keys: String,
    #[facet(default = 500)]
    /// Milliseconds between location polls.
    pub poll_interval_ms: u64,
    #[facet(default = 20000)]
    /// Milliseconds to wait for the editing surface before giving up.
    pub surface_timeout_ms: u64,
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_level: 1,
            include_top_level: true,
            show_floating_control: true,
            top_offset: 88,
            right_offset: 16,
            zero_fill_skipped_levels: false,
            renumber_keys: "ctrl+alt+n".to_string(),
            remove_keys: "ctrl+alt+shift+n".to_string(),
            poll_interval_ms: 500,
            surface_timeout_ms: 20000,
            file_extensions: vec!["md".to_string()],
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from headnum.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from `path`, falling back to defaults if it is missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        Self::from_toml(&contents).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
            Self::default()
        })
    }

    /// Parse configuration from TOML text; absent keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the parser's message if the text is not a valid configuration.
    pub fn from_toml(contents: &str) -> Result<Self, String> {
        facet_toml::from_str::<Self>(contents).map_err(|e| e.to_string())
    }

    #[must_use]
    /// Numbering options with the start level clamped into range.
    pub fn numbering_options(&self) -> NumberingOptions {
        let start_level = Level::clamped(i64::from(self.start_level));
        if start_level.get() != self.start_level {
            tracing::warn!(
                configured = self.start_level,
                using = start_level.get(),
                "start_level out of range, clamped"
            );
        }
        NumberingOptions {
            start_level,
            include_top_level: self.include_top_level,
            skip_policy: if self.zero_fill_skipped_levels {
                SkipPolicy::ZeroFill
            } else {
                SkipPolicy::Collapse
            },
        }
    }

    #[must_use]
    /// Placement and visibility of the floating control.
    pub fn overlay_settings(&self) -> OverlaySettings {
        OverlaySettings {
            show: self.show_floating_control,
            top_offset: self.top_offset,
            right_offset: self.right_offset,
        }
    }

    #[must_use]
    /// The configured chords, or the default chords if either is malformed.
    pub fn keymap(&self) -> Keymap {
        Keymap::parse(&self.renumber_keys, &self.remove_keys).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default chords");
            Keymap::default()
        })
    }

    #[must_use]
    /// Interval between location polls.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    #[must_use]
    /// Bound on the wait for the editing surface.
    pub fn surface_timeout(&self) -> Duration {
        Duration::from_millis(self.surface_timeout_ms)
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
