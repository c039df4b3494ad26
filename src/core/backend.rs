//! Terminal backend abstraction
//!
//! The mover loop never talks to the terminal directly. Every terminal
//! operation it needs goes through `Backend`, implemented by
//! `ui::CrosstermBackend` for the real terminal and by a recording fake in
//! tests.

use std::io;
use thiserror::Error;

use crate::ui::Key;
use crate::wm::{Panel, PanelId};

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Failed to initialize terminal: {0}")]
    Init(#[source] io::Error),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to restore terminal: {0}")]
    Restore(#[source] io::Error),

    #[error("Unknown panel: {0}")]
    UnknownPanel(PanelId),
}

pub type Result<T> = std::result::Result<T, BackendError>;

/// Operations the mover needs from a terminal
pub trait Backend {
    /// Enter raw mode without echo, with special-key decoding
    fn initialize(&mut self) -> Result<()>;

    /// Current screen size as (columns, rows)
    fn screen_size(&self) -> (u16, u16);

    /// Write text on the base screen at (`x`, `y`), overwriting only the
    /// cells it covers
    fn print_at(&mut self, x: u16, y: u16, text: &str) -> Result<()>;

    /// Allocate a bordered panel with its label and render it
    fn create_panel(&mut self, panel: Panel) -> Result<PanelId>;

    /// Reposition a panel; nothing is painted until the next refresh
    fn move_panel(&mut self, id: PanelId, x: u16, y: u16) -> Result<()>;

    /// Mark the whole base screen as needing a repaint
    fn touch_screen(&mut self) -> Result<()>;

    /// Repaint the base screen
    fn refresh_screen(&mut self) -> Result<()>;

    /// Repaint one panel on top of the base screen
    fn refresh_panel(&mut self, id: PanelId) -> Result<()>;

    /// Release a panel
    fn destroy_panel(&mut self, id: PanelId) -> Result<()>;

    /// Block until the next key arrives
    fn read_key(&mut self) -> Result<Key>;

    /// Restore the terminal mode saved by `initialize`
    fn shutdown(&mut self) -> Result<()>;
}

impl<B: Backend + ?Sized> Backend for &mut B {
    fn initialize(&mut self) -> Result<()> {
        (**self).initialize()
    }

    fn screen_size(&self) -> (u16, u16) {
        (**self).screen_size()
    }

    fn print_at(&mut self, x: u16, y: u16, text: &str) -> Result<()> {
        (**self).print_at(x, y, text)
    }

    fn create_panel(&mut self, panel: Panel) -> Result<PanelId> {
        (**self).create_panel(panel)
    }

    fn move_panel(&mut self, id: PanelId, x: u16, y: u16) -> Result<()> {
        (**self).move_panel(id, x, y)
    }

    fn touch_screen(&mut self) -> Result<()> {
        (**self).touch_screen()
    }

    fn refresh_screen(&mut self) -> Result<()> {
        (**self).refresh_screen()
    }

    fn refresh_panel(&mut self, id: PanelId) -> Result<()> {
        (**self).refresh_panel(id)
    }

    fn destroy_panel(&mut self, id: PanelId) -> Result<()> {
        (**self).destroy_panel(id)
    }

    fn read_key(&mut self) -> Result<Key> {
        (**self).read_key()
    }

    fn shutdown(&mut self) -> Result<()> {
        (**self).shutdown()
    }
}
