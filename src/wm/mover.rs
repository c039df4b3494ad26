//! Mover - arrow-key control loop for a single panel
//!
//! Each key press is one transition:
//!
//! | Key | Effect |
//! |-----|--------|
//! | ← | `x -= 1` if `x > 0` |
//! | → | `x += 1` if `x < cols - width - 4` |
//! | ↑ | `y -= 1` if `y > 0` |
//! | ↓ | `y += 1` if `y < rows - height - 1` |
//! | q | quit |
//!
//! Every key but quit is followed by a full redraw: the position readout is
//! printed at the origin, the panel is moved, the base screen is touched and
//! refreshed, then the panel is refreshed on top of it.

use tracing::{debug, info};

use crate::core::backend::Backend;
use crate::core::session::{Result, Session};
use crate::ui::Key;
use crate::wm::{Panel, PanelId};

/// Columns kept free to the right of the panel
pub const RIGHT_MARGIN: u16 = 4;
/// Rows kept free below the panel
pub const BOTTOM_MARGIN: u16 = 1;

/// Result of feeding one key to the mover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Continue,
    Quit,
}

/// Position state of the moving panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mover {
    pub x: u16,
    pub y: u16,
    width: u16,
    height: u16,
}

impl Mover {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Largest reachable x on a screen `cols` wide
    pub fn max_x(&self, cols: u16) -> u16 {
        cols.saturating_sub(self.width.saturating_add(RIGHT_MARGIN))
    }

    /// Largest reachable y on a screen `rows` tall
    pub fn max_y(&self, rows: u16) -> u16 {
        rows.saturating_sub(self.height.saturating_add(BOTTOM_MARGIN))
    }

    /// Apply one key on a screen of (`cols`, `rows`)
    pub fn step(&mut self, key: Key, cols: u16, rows: u16) -> Transition {
        match key {
            Key::Left => {
                if self.x > 0 {
                    self.x -= 1;
                }
            }
            Key::Right => {
                if self.x < self.max_x(cols) {
                    self.x += 1;
                }
            }
            Key::Up => {
                if self.y > 0 {
                    self.y -= 1;
                }
            }
            Key::Down => {
                if self.y < self.max_y(rows) {
                    self.y += 1;
                }
            }
            Key::Resize(cols, rows) => self.clamp(cols, rows),
            Key::Quit => return Transition::Quit,
            Key::Other => {}
        }
        Transition::Continue
    }

    /// Pull the position back inside the bounds of a (smaller) screen
    pub fn clamp(&mut self, cols: u16, rows: u16) {
        self.x = self.x.min(self.max_x(cols));
        self.y = self.y.min(self.max_y(rows));
    }

    /// Text printed at the screen origin after each key
    pub fn readout(&self) -> String {
        format!("{} {}", self.y, self.x)
    }
}

/// Show the hint line on the base screen, then create the panel over it
pub fn open_panel<B: Backend>(session: &mut Session<B>, hint: &str, panel: Panel) -> Result<PanelId> {
    session.backend_mut().print_at(0, 0, hint)?;
    session.backend_mut().refresh_screen()?;
    session.create_panel(panel)
}

/// Run the blocking key loop until the quit key.
///
/// Returns the final mover state. The caller still owns the session and
/// must shut it down.
pub fn run_loop<B: Backend>(session: &mut Session<B>, panel: PanelId, mut mover: Mover) -> Result<Mover> {
    info!("Entering key loop at ({}, {})", mover.x, mover.y);

    loop {
        let key = session.backend_mut().read_key()?;
        let (cols, rows) = session.backend().screen_size();

        if mover.step(key, cols, rows) == Transition::Quit {
            info!("Quit key pressed at ({}, {})", mover.x, mover.y);
            return Ok(mover);
        }
        debug!("{:?} -> ({}, {})", key, mover.x, mover.y);

        redraw(session.backend_mut(), panel, &mover)?;
    }
}

fn redraw<B: Backend>(backend: &mut B, panel: PanelId, mover: &Mover) -> Result<()> {
    backend.print_at(0, 0, &mover.readout())?;
    backend.move_panel(panel, mover.x, mover.y)?;
    backend.touch_screen()?;
    backend.refresh_screen()?;
    backend.refresh_panel(panel)?;
    Ok(())
}
