//! headnum: outline numbering for document headings.
//!
//! The numbering engine computes dotted labels (`1.2.3. `) from heading levels and writes them
//! through a [`surface::Surface`]. Markdown files are the bundled surface, usable in batch from
//! the command line or interactively in a terminal editor driven by hotkeys and a floating
//! control.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod config;
pub mod controller;
pub mod error;
pub mod formats;
pub mod heading;
pub mod hotkeys;
pub mod input;
pub mod navigation;
pub mod numbering;
pub mod overlay;
pub mod surface;
pub mod ui;

pub use error::{Error, Result};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
