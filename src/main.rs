//! wmove - move a bordered panel around the terminal
//!
//! wmove opens a full-screen session, draws a single bordered panel with a
//! label and moves it one cell per arrow-key press. The current position is
//! shown in the top-left corner as `row column`.
//!
//! # Keys
//!
//! | Key | Action |
//! |-----|--------|
//! | ← → ↑ ↓ | Move the panel one cell, stopping at the screen edges |
//! | q | Quit |
//!
//! Any other key only redraws the screen.
//!
//! Configuration: `~/.wmove/config.toml` (optional)
//! Log file: `~/.wmove/wmove.log`

mod config;
mod core;
mod ui;
mod wm;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::{crossterm_color, Config};
use crate::core::session::Session;
use crate::ui::CrosstermBackend;
use crate::wm::{open_panel, run_loop, Mover};

/// Log to a file; the terminal itself belongs to the UI
fn init_logging() {
    let log_path = config::data_dir()
        .map(|dir| dir.join("wmove.log"))
        .unwrap_or_else(|| std::path::PathBuf::from("wmove.log"));

    // Create log directory if needed
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    // Open log file (append mode)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::INFO)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    info!("wmove {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::load();
    let panel = config.panel.to_panel();
    let mover = Mover::new(panel.x, panel.y, panel.width, panel.height);

    let backend = CrosstermBackend::stdout()
        .context("Failed to query terminal size")?
        .with_colors(
            crossterm_color(config.colors.border),
            crossterm_color(config.colors.label),
        );
    let mut session = Session::new(backend);
    session
        .initialize()
        .context("Failed to initialize terminal")?;

    let id = open_panel(&mut session, &config.hint, panel)?;
    let mover = run_loop(&mut session, id, mover)?;
    session.shutdown(id).context("Failed to restore terminal")?;

    info!("wmove exiting at ({}, {}), session {}", mover.x, mover.y, session.state());
    Ok(())
}
