//! The interactive session bridging files on disk, the editor buffer and the controller.
//!
//! The session exposes a location the same way a single-page app would: `/` for the file list
//! and `/edit/<path>` while a document is open. Every loop iteration the location is polled, so
//! opening or closing a document is noticed by the controller rather than wired into it, and
//! the editor buffer only appears once the controller has waited for the file to load.

use crate::config::Config;
use crate::controller::Controller;
use crate::formats::markdown::MarkdownDocument;
use crate::hotkeys::Action;
use crate::navigation::NavigationEvent;
use crate::numbering::PassReport;
use edtui::{EditorState, Lines};
use ratatui::layout::Rect;
use std::convert::Infallible;
use std::path::PathBuf;
use std::{fs, io};

#[derive(PartialEq)]
/// Determines quit behavior based on how many files were given.
pub enum FileMode {
    /// Single-file mode quits directly to shell.
    Single,
    /// Multi-file mode returns to file list before quitting.
    Multi,
}

#[derive(PartialEq, Debug)]
/// Determines which UI screen renders and how input is interpreted.
pub enum View {
    /// Displays available files.
    FileList,
    /// Shows the editor for one file.
    Edit,
}

/// Session state for the terminal editor.
pub struct AppState {
    /// File paths available for editing.
    pub files: Vec<PathBuf>,
    /// Selected file in the file list view.
    pub current_file_index: usize,
    /// Controls quit behavior and file list visibility.
    pub file_mode: FileMode,
    /// Active UI screen determining input handling.
    pub current_view: View,
    /// Editor buffer, present once the controller has attached.
    pub editor_state: Option<EditorState>,
    /// Status feedback shown as a banner above the editor.
    pub message: Option<String>,
    /// Owner of the floating control and hotkey state.
    pub controller: Controller,
    /// Screen cells covered by the floating control at the last draw.
    pub control_area: Option<Rect>,
    /// Whether the buffer differs from the file on disk.
    pub dirty: bool,
    open_file: Option<PathBuf>,
    trailing_newline: bool,
}

impl AppState {
    #[must_use]
    /// Initialises the session; a single file opens straight into the editor.
    pub fn new(files: Vec<PathBuf>, cfg: &Config) -> Self {
        let file_mode = if files.len() == 1 {
            FileMode::Single
        } else {
            FileMode::Multi
        };
        let current_view = if file_mode == FileMode::Single {
            View::Edit
        } else {
            View::FileList
        };

        Self {
            files,
            current_file_index: 0,
            file_mode,
            current_view,
            editor_state: None,
            message: None,
            controller: Controller::new(cfg, "/"),
            control_area: None,
            dirty: false,
            open_file: None,
            trailing_newline: false,
        }
    }

    #[must_use]
    /// The navigable location of the current view.
    pub fn location(&self) -> String {
        match (&self.current_view, self.files.get(self.current_file_index)) {
            (View::Edit, Some(path)) => format!("/edit/{}", path.display()),
            _ => "/".to_string(),
        }
    }

    #[must_use]
    /// The file loaded into the editor, if any.
    pub fn open_file(&self) -> Option<&PathBuf> {
        self.open_file.as_ref()
    }

    /// Polls the location and attaches or detaches the controller on a change.
    pub fn tick(&mut self) {
        match self.controller.poll(&self.location()) {
            Some(NavigationEvent::EnteredEdit(location)) => {
                tracing::debug!(%location, "entering edit mode");
                self.attach();
            }
            Some(NavigationEvent::LeftEdit(location)) => {
                tracing::debug!(%location, "leaving edit mode");
                self.controller.leave_edit();
                self.editor_state = None;
                self.open_file = None;
                self.control_area = None;
                self.dirty = false;
            }
            None => {}
        }
    }

    fn attach(&mut self) {
        let Some(path) = self.files.get(self.current_file_index).cloned() else {
            return;
        };
        self.editor_state = None;
        let loaded = self
            .controller
            .enter_edit(|| fs::read_to_string(&path).ok());
        if let Some(text) = loaded {
            self.trailing_newline = text.ends_with('\n');
            self.editor_state = Some(EditorState::new(Lines::from(text.as_str())));
            self.open_file = Some(path);
            self.dirty = false;
            self.reposition_control();
        }
    }

    /// Switches to the editor for the selected file; the next tick attaches.
    pub fn open_selected(&mut self) {
        if !self.files.is_empty() {
            self.current_view = View::Edit;
            self.message = None;
        }
    }

    /// Leaves the editor. Returns `true` if the whole session should end.
    pub fn close_editor(&mut self) -> bool {
        if self.file_mode == FileMode::Single {
            return true;
        }
        if self.dirty {
            self.message = Some("Discarded unsaved changes".to_string());
        }
        self.current_view = View::FileList;
        false
    }

    /// Runs `action` over the editor buffer and reports the outcome in the banner.
    pub fn apply(&mut self, action: Action) -> Option<PassReport> {
        let editor = self.editor_state.as_mut()?;
        let mut doc = match MarkdownDocument::parse(editor_text(editor)) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(error = %e, "could not read headings from buffer");
                return None;
            }
        };

        let report = self.controller.dispatch(action, &mut doc);
        if doc.is_modified() {
            editor.lines = Lines::from(doc.source());
            self.dirty = true;
        }

        self.message = Some(match action {
            Action::Renumber => format!("Numbered {} headings", report.numbered),
            Action::RemoveAll => format!("Cleared {} headings", report.cleared),
        });
        self.reposition_control();
        Some(report)
    }

    /// Writes the editor buffer back to the open file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&mut self) -> io::Result<()> {
        let (Some(editor), Some(path)) = (&self.editor_state, &self.open_file) else {
            self.message = Some("Nothing to save".to_string());
            return Ok(());
        };
        let mut text = editor_text(editor);
        if self.trailing_newline && !text.ends_with('\n') {
            text.push('\n');
        }
        fs::write(path, text)?;
        tracing::info!(path = %path.display(), "saved");
        self.dirty = false;
        self.message = Some("Saved".to_string());
        self.reposition_control();
        Ok(())
    }

    /// Clears the banner.
    pub fn dismiss_message(&mut self) {
        if self.message.take().is_some() {
            self.reposition_control();
        }
    }

    /// Re-evaluates the floating control's position against the banner.
    pub fn reposition_control(&mut self) {
        let banner = self.message.is_some();
        if let Some(control) = self.controller.control_mut() {
            control.nudge_for_banner(|| Ok::<_, Infallible>(banner));
        }
    }

    /// Updates hover state from a pointer position.
    pub fn hover(&mut self, column: u16, row: u16) {
        let over = self
            .control_area
            .is_some_and(|area| area.contains((column, row).into()));
        if let Some(control) = self.controller.control_mut() {
            control.hovered = over;
        }
    }

    /// Handles a click, running a pass if it landed on the floating control.
    pub fn click(&mut self, column: u16, row: u16) -> Option<PassReport> {
        let area = self.control_area?;
        if !area.contains((column, row).into()) {
            return None;
        }
        let action = self.controller.click()?;
        self.apply(action)
    }
}

fn editor_text(editor: &EditorState) -> String {
    editor
        .lines
        .iter_row()
        .map(|line| line.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
