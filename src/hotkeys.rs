//! Keyboard chords that trigger numbering passes.
//!
//! Chords are written as `ctrl+alt+n` in configuration. Matching ignores the case of the key, and
//! an uppercase character counts as shift held, since terminals report shifted letters either way.

use crate::error::{Error, Result};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What a trigger asks the numbering engine to do.
pub enum Action {
    /// Run a numbering pass.
    Renumber,
    /// Strip every label.
    RemoveAll,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// A key plus the exact set of modifiers that must be held.
pub struct Chord {
    /// Control held.
    pub ctrl: bool,
    /// Alt (Option) held.
    pub alt: bool,
    /// Shift held.
    pub shift: bool,
    /// The key, lowercased.
    pub key: char,
}

impl Chord {
    #[must_use]
    /// Reads a chord from a terminal key press, ignoring releases and non-character keys.
    pub fn from_key_event(event: &KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        let KeyCode::Char(c) = event.code else {
            return None;
        };
        Some(Self {
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            alt: event.modifiers.contains(KeyModifiers::ALT),
            shift: event.modifiers.contains(KeyModifiers::SHIFT) || c.is_uppercase(),
            key: c.to_ascii_lowercase(),
        })
    }
}

impl FromStr for Chord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidChord(s.to_string());
        let mut chord = Self {
            ctrl: false,
            alt: false,
            shift: false,
            key: '\0',
        };
        let mut key = None;

        for part in s.split('+').map(str::trim) {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => chord.ctrl = true,
                "alt" | "option" => chord.alt = true,
                "shift" => chord.shift = true,
                other => {
                    let mut chars = other.chars();
                    match (chars.next(), chars.next(), key) {
                        (Some(c), None, None) => key = Some(c),
                        _ => return Err(invalid()),
                    }
                }
            }
        }

        chord.key = key.ok_or_else(invalid)?;
        Ok(chord)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.alt {
            write!(f, "Alt+")?;
        }
        if self.shift {
            write!(f, "Shift+")?;
        }
        write!(f, "{}", self.key.to_ascii_uppercase())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Binds the renumber and remove actions to one chord each.
pub struct Keymap {
    /// Chord that runs a numbering pass.
    pub renumber: Chord,
    /// Chord that strips every label.
    pub remove_all: Chord,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            renumber: Chord {
                ctrl: true,
                alt: true,
                shift: false,
                key: 'n',
            },
            remove_all: Chord {
                ctrl: true,
                alt: true,
                shift: true,
                key: 'n',
            },
        }
    }
}

impl Keymap {
    /// Builds a keymap from the two configured chord strings.
    ///
    /// # Errors
    ///
    /// Returns an error if either chord cannot be parsed.
    pub fn parse(renumber: &str, remove_all: &str) -> Result<Self> {
        Ok(Self {
            renumber: renumber.parse()?,
            remove_all: remove_all.parse()?,
        })
    }

    #[must_use]
    /// The action bound to `chord`, if any.
    pub fn action(&self, chord: Chord) -> Option<Action> {
        if chord == self.renumber {
            Some(Action::Renumber)
        } else if chord == self.remove_all {
            Some(Action::RemoveAll)
        } else {
            None
        }
    }

    #[must_use]
    /// Hover text for the floating control.
    pub fn tooltip(&self) -> String {
        format!(
            "Number headings ({}) • Remove ({})",
            self.renumber, self.remove_all
        )
    }
}

#[cfg(test)]
#[path = "tests/hotkeys.rs"]
mod tests;
