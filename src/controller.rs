//! Owner of all state that outlives a single numbering pass.
//!
//! The controller holds the last seen location and the floating control. Entering edit mode waits
//! (bounded) for the surface and creates the control; leaving edit mode drops it. Triggers are
//! only honoured while attached, and each one runs a complete pass through the engine.

use crate::config::Config;
use crate::hotkeys::{Action, Chord, Keymap};
use crate::navigation::{self, NavigationEvent, NavigationWatcher};
use crate::numbering::{self, NumberingOptions, PassReport};
use crate::overlay::{FloatingControl, OverlaySettings};
use crate::surface::Surface;
use ratatui::crossterm::event::KeyEvent;
use std::time::Duration;

/// Gap between attempts while waiting for the surface to appear.
pub const SURFACE_PROBE_INTERVAL: Duration = Duration::from_millis(50);

/// Process-local state for one running session.
pub struct Controller {
    options: NumberingOptions,
    keymap: Keymap,
    overlay: OverlaySettings,
    surface_timeout: Duration,
    watcher: NavigationWatcher,
    control: Option<FloatingControl>,
    attached: bool,
}

impl Controller {
    #[must_use]
    /// Creates a detached controller that has already seen `initial_location`.
    pub fn new(cfg: &Config, initial_location: &str) -> Self {
        Self {
            options: cfg.numbering_options(),
            keymap: cfg.keymap(),
            overlay: cfg.overlay_settings(),
            surface_timeout: cfg.surface_timeout(),
            watcher: NavigationWatcher::new(initial_location),
            control: None,
            attached: false,
        }
    }

    #[must_use]
    /// Whether triggers are currently honoured.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    #[must_use]
    /// Numbering options every renumber pass uses.
    pub fn options(&self) -> &NumberingOptions {
        &self.options
    }

    #[must_use]
    /// The bound chords.
    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    #[must_use]
    /// The floating control, present only while attached and enabled.
    pub fn control(&self) -> Option<&FloatingControl> {
        self.control.as_ref()
    }

    /// Mutable access to the floating control for hover state and placement.
    pub fn control_mut(&mut self) -> Option<&mut FloatingControl> {
        self.control.as_mut()
    }

    /// Reports a location change since the previous poll.
    pub fn poll(&mut self, location: &str) -> Option<NavigationEvent> {
        self.watcher.poll(location)
    }

    /// Waits for the surface and attaches, creating the floating control.
    ///
    /// Returns whatever the probe produced. If the surface never appears the controller stays
    /// detached and a warning is logged; nothing is shown to the user.
    pub fn enter_edit<S>(&mut self, probe: impl FnMut() -> Option<S>) -> Option<S> {
        match navigation::wait_for(self.surface_timeout, SURFACE_PROBE_INTERVAL, probe) {
            Ok(surface) => {
                self.attached = true;
                if self.overlay.show && self.control.is_none() {
                    self.control = Some(FloatingControl::new(
                        &self.overlay,
                        self.keymap.tooltip(),
                    ));
                }
                tracing::info!("attached to editing surface");
                Some(surface)
            }
            Err(e) => {
                tracing::warn!(error = %e, "editor not detected");
                None
            }
        }
    }

    /// Detaches and drops the floating control.
    pub fn leave_edit(&mut self) {
        if self.attached {
            tracing::info!("detached from editing surface");
        }
        self.attached = false;
        self.control = None;
    }

    #[must_use]
    /// The action bound to a key press, if attached.
    pub fn action_for(&self, event: &KeyEvent) -> Option<Action> {
        if !self.attached {
            return None;
        }
        Chord::from_key_event(event).and_then(|chord| self.keymap.action(chord))
    }

    #[must_use]
    /// The action a click on the floating control triggers.
    pub fn click(&self) -> Option<Action> {
        self.control.as_ref().map(|_| Action::Renumber)
    }

    /// Runs one full pass for `action` over `surface`.
    pub fn dispatch<S: Surface + ?Sized>(&self, action: Action, surface: &mut S) -> PassReport {
        match action {
            Action::Renumber => numbering::renumber(surface, &self.options),
            Action::RemoveAll => numbering::remove_all(surface),
        }
    }
}

#[cfg(test)]
#[path = "tests/controller.rs"]
mod tests;
