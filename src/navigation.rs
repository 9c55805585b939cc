//! Watching the current location for moves into and out of edit mode.
//!
//! The watcher is driven by whoever owns the clock: each poll hands it the current location and
//! it reports a transition only when the location differs from the last one it saw. The bounded
//! wait covers the gap between entering an edit location and the surface actually existing.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::thread;
use std::time::{Duration, Instant};

static EDIT_LOCATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/edit(?:-v2)?/").expect("edit location pattern is valid"));

#[must_use]
/// Whether `location` names an edit view.
pub fn is_edit_location(location: &str) -> bool {
    EDIT_LOCATION.is_match(location)
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A change of location as seen by the watcher.
pub enum NavigationEvent {
    /// Arrived at an edit location (including moving from one edit location to another).
    EnteredEdit(String),
    /// Arrived at a location that is not an edit view.
    LeftEdit(String),
}

#[derive(Clone, Debug)]
/// Remembers the last seen location and reports changes.
pub struct NavigationWatcher {
    last: String,
}

impl NavigationWatcher {
    #[must_use]
    /// Starts watching from `initial`, which is never itself reported.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            last: initial.into(),
        }
    }

    #[must_use]
    /// The location seen most recently.
    pub fn last(&self) -> &str {
        &self.last
    }

    /// Compares `current` with the last location, reporting a transition if it changed.
    pub fn poll(&mut self, current: &str) -> Option<NavigationEvent> {
        if current == self.last {
            return None;
        }
        current.clone_into(&mut self.last);
        tracing::debug!(location = current, "location changed");
        Some(if is_edit_location(current) {
            NavigationEvent::EnteredEdit(current.to_string())
        } else {
            NavigationEvent::LeftEdit(current.to_string())
        })
    }
}

/// Polls `probe` every `interval` until it yields a value or `timeout` has passed.
///
/// The probe is always tried at least once, so an already-available value returns immediately.
///
/// # Errors
///
/// Returns [`Error::SurfaceTimeout`] if the probe never yields within `timeout`.
pub fn wait_for<T>(
    timeout: Duration,
    interval: Duration,
    mut probe: impl FnMut() -> Option<T>,
) -> Result<T> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(found) = probe() {
            return Ok(found);
        }
        let now = Instant::now();
        if now >= deadline {
            return Err(Error::SurfaceTimeout(timeout));
        }
        thread::sleep(interval.min(deadline - now));
    }
}

#[cfg(test)]
#[path = "tests/navigation.rs"]
mod tests;
