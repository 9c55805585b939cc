//! The UI renders the application state into something visible and vim-able.
//!
//! The draw function dispatches based on the current view (file list or editor). The editor view
//! shows the buffer beside a live outline preview, a status banner when there is news, and the
//! floating `#` control overlaid at its configured offset from the top-right corner.

use crate::app_state::{AppState, View};
use crate::formats::markdown::MarkdownDocument;
use crate::numbering;
use crate::overlay::FloatingControl;
use crate::surface::Surface;
use edtui::{EditorTheme, EditorView, SyntaxHighlighter};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

/// Approximate pixel width of one terminal cell, for converting overlay offsets.
const CELL_WIDTH_PX: u32 = 8;
/// Approximate pixel height of one terminal cell.
const CELL_HEIGHT_PX: u32 = 16;
const CONTROL_WIDTH: u16 = 5;
const CONTROL_HEIGHT: u16 = 3;

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &mut AppState) {
    match app.current_view {
        View::FileList => draw_file_list(f, app),
        View::Edit => draw_editor(f, app),
    }
}

fn draw_file_list(f: &mut Frame, app: &mut AppState) {
    app.control_area = None;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let items: Vec<ListItem> = app
        .files
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let style = if i == app.current_file_index {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(
                format!("📄 {}", path.display()),
                style,
            )))
        })
        .collect();

    let title = format!("Files ({})", app.files.len());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, chunks[0]);

    let help = app
        .message
        .clone()
        .unwrap_or_else(|| "↑/↓: Navigate | Enter: Edit | q: Quit".to_string());
    let help_widget = Paragraph::new(help).block(Block::default().borders(Borders::ALL));
    f.render_widget(help_widget, chunks[1]);
}

fn draw_editor(f: &mut Frame, app: &mut AppState) {
    let banner_height = u16::from(app.message.is_some());
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height), // Banner
            Constraint::Min(0),                // Editor + outline
            Constraint::Length(3),             // Help
        ])
        .split(f.area());

    if let Some(ref msg) = app.message {
        let banner = Paragraph::new(msg.as_str())
            .style(Style::default().fg(Color::Black).bg(Color::Cyan));
        f.render_widget(banner, rows[0]);
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(rows[1]);

    let title = match app.open_file() {
        Some(path) if app.dirty => format!("{} [+]", path.display()),
        Some(path) => path.display().to_string(),
        None => "Waiting for editor…".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(columns[0]);
    f.render_widget(block, columns[0]);

    let mut outline_lines = Vec::new();
    if let Some(ref mut editor_state) = app.editor_state {
        outline_lines = outline_preview(editor_state, app.controller.options());

        let syntax_highlighter = SyntaxHighlighter::new("dracula", "md");
        let editor = EditorView::new(editor_state)
            .theme(EditorTheme::default())
            .syntax_highlighter(Some(syntax_highlighter))
            .wrap(true);
        f.render_widget(editor, inner);
    }

    let outline = List::new(outline_lines.into_iter().map(ListItem::new).collect::<Vec<_>>())
        .block(Block::default().borders(Borders::ALL).title("Outline"));
    f.render_widget(outline, columns[1]);

    let keymap = app.controller.keymap();
    let help_text = format!(
        "{}: Number | {}: Remove | Ctrl+S: Save | Esc: Close",
        keymap.renumber, keymap.remove_all
    );
    let help = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(help, rows[2]);

    app.control_area = app.controller.control().map(|control| {
        let area = control_rect(f.area(), control);
        draw_control(f, area, control);
        area
    });
}

/// Headings of the buffer as they would be numbered, indented by level.
fn outline_preview(
    editor_state: &edtui::EditorState,
    options: &numbering::NumberingOptions,
) -> Vec<Line<'static>> {
    let text = editor_state
        .lines
        .iter_row()
        .map(|line| line.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n");
    let Ok(doc) = MarkdownDocument::parse(text) else {
        return Vec::new();
    };

    numbering::outline(&doc.headings(), options)
        .into_iter()
        .map(|entry| {
            let indent = "  ".repeat(entry.level.slot());
            let label = entry.label.unwrap_or_default();
            Line::from(vec![
                Span::raw(indent),
                Span::styled(label, Style::default().fg(Color::Yellow)),
                Span::raw(entry.text),
            ])
        })
        .collect()
}

/// Screen cells for the floating control, measured from the top-right of `area`.
fn control_rect(area: Rect, control: &FloatingControl) -> Rect {
    let down = u16::try_from(control.top / CELL_HEIGHT_PX).unwrap_or(u16::MAX);
    let in_from_right = u16::try_from(control.right / CELL_WIDTH_PX).unwrap_or(u16::MAX);

    let width = CONTROL_WIDTH.min(area.width);
    let height = CONTROL_HEIGHT.min(area.height);
    let x = area
        .right()
        .saturating_sub(in_from_right)
        .saturating_sub(width)
        .max(area.x);
    let y = area
        .y
        .saturating_add(down)
        .min(area.bottom().saturating_sub(height));
    Rect::new(x, y, width, height)
}

fn draw_control(f: &mut Frame, area: Rect, control: &FloatingControl) {
    let style = if control.hovered {
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Blue).bg(Color::White)
    };
    let button = Paragraph::new(control.caption.as_str())
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(Clear, area);
    f.render_widget(button, area);

    if control.hovered {
        let screen = f.area();
        let tip_width = u16::try_from(control.tooltip.chars().count())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(screen.width);
        let tip_y = area.bottom().min(screen.bottom().saturating_sub(1));
        let tip = Rect::new(
            area.right().saturating_sub(tip_width).max(screen.x),
            tip_y,
            tip_width,
            1,
        );
        f.render_widget(Clear, tip);
        f.render_widget(
            Paragraph::new(format!(" {} ", control.tooltip))
                .style(Style::default().fg(Color::Black).bg(Color::Gray)),
            tip,
        );
    }
}

#[cfg(test)]
#[path = "tests/ui.rs"]
mod tests;
