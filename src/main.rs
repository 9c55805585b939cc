//! headnum: outline numbering for document headings.
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use edtui::{EditorEventHandler, EditorMode};
use headnum::formats::markdown::MarkdownDocument;
use headnum::numbering::{self, NumberingOptions, OutlineEntry, SkipPolicy};
use headnum::surface::Surface;
use headnum::{app_state, config, heading::Level, input, ui};
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "headnum")]
#[command(about = "Outline numbering for document headings", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct Targets {
    /// Files or directories to process
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// File extensions to match
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,
}

#[derive(clap::Args)]
struct NumberingArgs {
    /// Shallowest heading level to number (1-6)
    #[arg(long, value_name = "N")]
    start_level: Option<u8>,

    /// Leave H1 headings unnumbered
    #[arg(long)]
    exclude_top_level: bool,

    /// Render skipped levels as 0 instead of dropping them
    #[arg(long)]
    zero_fill: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Number headings in place
    Number {
        #[command(flatten)]
        targets: Targets,
        #[command(flatten)]
        numbering: NumberingArgs,
        /// Print the result instead of writing files
        #[arg(long)]
        dry_run: bool,
    },
    /// Strip heading numbers in place
    Strip {
        #[command(flatten)]
        targets: Targets,
        /// Print the result instead of writing files
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the labels a numbering pass would assign
    Outline {
        #[command(flatten)]
        targets: Targets,
        #[command(flatten)]
        numbering: NumberingArgs,
        /// Emit JSON instead of an indented listing
        #[arg(long)]
        json: bool,
    },
    /// Open the interactive editor
    Edit {
        #[command(flatten)]
        targets: Targets,
        /// Write logs to this file (the terminal is otherwise silent)
        #[arg(long, value_name = "FILE")]
        log_file: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct FileOutline {
    path: String,
    headings: Vec<OutlineEntry>,
}

fn main() -> headnum::Result<()> {
    let args = Args::parse();

    match &args.command {
        Command::Edit { log_file, .. } => {
            if let Some(path) = log_file {
                init_tracing(Some(path.as_path()))?;
            }
        }
        _ => init_tracing(None)?,
    }

    let mut cfg = config::Config::load();

    match args.command {
        Command::Number {
            targets,
            numbering: flags,
            dry_run,
        } => {
            let documents = resolve(targets, &mut cfg)?;
            let options = flags.apply_to(&cfg);
            rewrite(&documents, dry_run, |doc| {
                numbering::renumber(doc, &options).numbered
            })
        }
        Command::Strip { targets, dry_run } => {
            let documents = resolve(targets, &mut cfg)?;
            rewrite(&documents, dry_run, |doc| numbering::remove_all(doc).cleared)
        }
        Command::Outline {
            targets,
            numbering: flags,
            json,
        } => {
            let documents = resolve(targets, &mut cfg)?;
            let options = flags.apply_to(&cfg);
            print_outline(&documents, &options, json)
        }
        Command::Edit { targets, .. } => {
            let documents = resolve(targets, &mut cfg)?;
            if documents.is_empty() {
                eprintln!("No matching files found");
                return Ok(());
            }
            let state = app_state::AppState::new(documents, &cfg);
            run_tui(state, cfg.poll_interval())?;
            Ok(())
        }
    }
}

fn init_tracing(log_file: Option<&Path>) -> io::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(io::stderr)
                .with_target(false)
                .init();
        }
    }
    Ok(())
}

impl NumberingArgs {
    /// Command line flags layered over the configured options.
    fn apply_to(&self, cfg: &config::Config) -> NumberingOptions {
        let mut options = cfg.numbering_options();
        if let Some(level) = self.start_level {
            options.start_level = Level::clamped(i64::from(level));
        }
        if self.exclude_top_level {
            options.include_top_level = false;
        }
        if self.zero_fill {
            options.skip_policy = SkipPolicy::ZeroFill;
        }
        options
    }
}

fn resolve(targets: Targets, cfg: &mut config::Config) -> headnum::Result<Vec<PathBuf>> {
    // Override config with command line args
    if !targets.ext.is_empty() {
        cfg.file_extensions = targets.ext;
    }
    let documents = input::find_documents(targets.paths, &cfg.file_extensions)?;
    tracing::debug!(count = documents.len(), "resolved documents");
    Ok(documents)
}

fn rewrite(
    documents: &[PathBuf],
    dry_run: bool,
    mut pass: impl FnMut(&mut MarkdownDocument) -> usize,
) -> headnum::Result<()> {
    let mut touched = 0;
    let mut headings = 0;

    for path in documents {
        let mut doc = match MarkdownDocument::load(path) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable document");
                continue;
            }
        };
        headings += pass(&mut doc);

        if dry_run {
            if documents.len() > 1 {
                println!("==> {} <==", path.display());
            }
            print!("{}", doc.source());
        } else if doc.is_modified() {
            doc.save(path)?;
            touched += 1;
            tracing::info!(path = %path.display(), "rewrote headings");
        }
    }

    if !dry_run {
        tracing::info!(files = touched, headings, "done");
    }
    Ok(())
}

fn print_outline(
    documents: &[PathBuf],
    options: &NumberingOptions,
    json: bool,
) -> headnum::Result<()> {
    let mut outlines = Vec::new();
    for path in documents {
        match MarkdownDocument::load(path) {
            Ok(doc) => {
                outlines.push(FileOutline {
                    path: path.display().to_string(),
                    headings: numbering::outline(&doc.headings(), options),
                });
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable document");
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outlines)?);
        return Ok(());
    }

    for outline in &outlines {
        println!("{}", outline.path);
        for entry in &outline.headings {
            let indent = "  ".repeat(entry.level.slot());
            let label = entry.label.as_deref().unwrap_or("");
            println!("{indent}{label}{}", entry.text);
        }
    }
    Ok(())
}

fn run_tui(mut app: app_state::AppState, poll_interval: Duration) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut editor_handler = EditorEventHandler::default();

    let result = run_app(&mut terminal, &mut app, &mut editor_handler, poll_interval);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut app_state::AppState,
    editor_handler: &mut EditorEventHandler,
    poll_interval: Duration,
) -> io::Result<()> {
    loop {
        // Each iteration is a navigation poll, at most `poll_interval` apart.
        app.tick();
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(poll_interval)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if handle_key(app, key, editor_handler) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    app.click(mouse.column, mouse.row);
                }
                MouseEventKind::Moved => app.hover(mouse.column, mouse.row),
                _ => {}
            },
            Event::Resize(_, _) => app.reposition_control(),
            _ => {}
        }
    }
}

/// Handles one key press. Returns `true` when the session should end.
fn handle_key(
    app: &mut app_state::AppState,
    key: KeyEvent,
    editor_handler: &mut EditorEventHandler,
) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }

    match app.current_view {
        app_state::View::FileList => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                app.current_file_index = app.current_file_index.saturating_sub(1);
            }
            KeyCode::Down => {
                if app.current_file_index + 1 < app.files.len() {
                    app.current_file_index += 1;
                }
            }
            KeyCode::Enter => app.open_selected(),
            _ => {}
        },
        app_state::View::Edit => {
            if let Some(action) = app.controller.action_for(&key) {
                app.apply(action);
                return false;
            }
            app.dismiss_message();

            if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
                if let Err(e) = app.save() {
                    app.message = Some(format!("Error saving: {e}"));
                }
                return false;
            }

            let in_normal_mode = app
                .editor_state
                .as_ref()
                .is_none_or(|editor| editor.mode == EditorMode::Normal);
            if key.code == KeyCode::Esc && in_normal_mode {
                return app.close_editor();
            }

            if let Some(ref mut editor_state) = app.editor_state {
                editor_handler.on_key_event(key, editor_state);
                if editor_state.mode == EditorMode::Insert {
                    app.dirty = true;
                }
            }
        }
    }
    false
}
