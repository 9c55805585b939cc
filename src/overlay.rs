//! The floating `#` control that triggers a numbering pass.
//!
//! Placement is expressed in pixels from the top-right corner, like an overlay on a web page.
//! The terminal UI converts pixels to cells when it draws the control.

/// Extra distance pushed down when a banner occupies the top of the screen.
pub const BANNER_NUDGE: u32 = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Where the control sits and whether it is shown at all.
pub struct OverlaySettings {
    /// Whether the control is created on entering edit mode.
    pub show: bool,
    /// Pixels below the top edge.
    pub top_offset: u32,
    /// Pixels from the right edge.
    pub right_offset: u32,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            show: true,
            top_offset: 88,
            right_offset: 16,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A live floating control, existing only while in edit mode.
pub struct FloatingControl {
    /// Text on the control.
    pub caption: String,
    /// Hover text naming both chords.
    pub tooltip: String,
    /// Current distance from the top edge in pixels, including any nudge.
    pub top: u32,
    /// Distance from the right edge in pixels.
    pub right: u32,
    /// Whether the pointer is over the control.
    pub hovered: bool,
    base_top: u32,
}

impl FloatingControl {
    #[must_use]
    /// Creates the control at its configured position.
    pub fn new(settings: &OverlaySettings, tooltip: impl Into<String>) -> Self {
        Self {
            caption: "#".to_string(),
            tooltip: tooltip.into(),
            top: settings.top_offset,
            right: settings.right_offset,
            hovered: false,
            base_top: settings.top_offset,
        }
    }

    /// Moves the control down when `banner_present` reports a banner across the top.
    ///
    /// The probe is best-effort: if it fails, the control keeps its current position.
    pub fn nudge_for_banner<E: std::fmt::Display>(
        &mut self,
        banner_present: impl FnOnce() -> Result<bool, E>,
    ) {
        match banner_present() {
            Ok(present) => {
                let extra = if present { BANNER_NUDGE } else { 0 };
                self.top = self.base_top + extra;
            }
            Err(e) => tracing::debug!(error = %e, "banner probe failed, placement unchanged"),
        }
    }
}

#[cfg(test)]
#[path = "tests/overlay.rs"]
mod tests;
