//! Terminal renderer using crossterm
//!
//! `CrosstermBackend` keeps a character grid for the base screen and a list
//! of panels. The base screen is only repainted when it was written to or
//! touched since the last refresh; panels are painted on request, on top of
//! whatever the base screen left behind.

use std::io::{self, Write};

use crossterm::{
    cursor::{MoveTo, Show},
    event,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::{debug, error};
use unicode_width::UnicodeWidthChar;

use crate::core::backend::{Backend, BackendError, Result};
use crate::ui::{Key, KeyMapper};
use crate::wm::{Panel, PanelId};

/// Base screen contents, one `char` per cell
struct ScreenGrid {
    cols: u16,
    rows: u16,
    cells: Vec<Vec<char>>,
}

impl ScreenGrid {
    fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![vec![' '; cols as usize]; rows as usize],
        }
    }

    /// Resize, keeping whatever still fits
    fn resize(&mut self, cols: u16, rows: u16) {
        self.cells.resize(rows as usize, vec![' '; cols as usize]);
        for row in &mut self.cells {
            row.resize(cols as usize, ' ');
        }
        self.cols = cols;
        self.rows = rows;
    }

    /// Overwrite cells starting at (`x`, `y`); text past the right edge is dropped
    fn put_str(&mut self, x: u16, y: u16, text: &str) {
        let Some(row) = self.cells.get_mut(y as usize) else {
            return;
        };
        for (cell, ch) in row.iter_mut().skip(x as usize).zip(text.chars()) {
            *cell = ch;
        }
    }

    fn row_text(&self, y: u16) -> String {
        self.cells
            .get(y as usize)
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }
}

fn display_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Take the longest prefix of `text` whose display width fits in `max`
fn clip_to_width(text: &str, max: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max {
            break;
        }
        width += w;
        out.push(ch);
    }
    out
}

/// Backend rendering to a real terminal (or any writer, in tests)
pub struct CrosstermBackend<W: Write> {
    out: W,
    screen: ScreenGrid,
    panels: Vec<(PanelId, Panel)>,
    next_id: u64,
    /// Base screen needs a repaint on the next refresh
    dirty: bool,
    /// Raw mode and the alternate screen are active
    initialized: bool,
    border_color: Color,
    label_color: Color,
}

impl CrosstermBackend<io::Stdout> {
    /// Backend on stdout sized to the current terminal
    pub fn stdout() -> Result<Self> {
        let (cols, rows) = terminal::size().map_err(BackendError::Init)?;
        Ok(Self::new(io::stdout(), cols, rows))
    }
}

impl<W: Write> CrosstermBackend<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            screen: ScreenGrid::new(cols, rows),
            panels: Vec::new(),
            next_id: 1,
            dirty: true,
            initialized: false,
            border_color: Color::Reset,
            label_color: Color::Reset,
        }
    }

    pub fn with_colors(mut self, border: Color, label: Color) -> Self {
        self.border_color = border;
        self.label_color = label;
        self
    }

    /// Bytes written so far
    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }

    fn panel(&self, id: PanelId) -> Result<&Panel> {
        self.panels
            .iter()
            .find(|(pid, _)| *pid == id)
            .map(|(_, p)| p)
            .ok_or(BackendError::UnknownPanel(id))
    }

    fn panel_mut(&mut self, id: PanelId) -> Result<&mut Panel> {
        self.panels
            .iter_mut()
            .find(|(pid, _)| *pid == id)
            .map(|(_, p)| p)
            .ok_or(BackendError::UnknownPanel(id))
    }

    /// Paint a panel's border and label, clipped to the screen
    fn draw_panel(&mut self, id: PanelId) -> Result<()> {
        let panel = self.panel(id)?.clone();
        let (cols, rows) = (self.screen.cols, self.screen.rows);
        if panel.x >= cols || panel.y >= rows || panel.width < 2 || panel.height < 2 {
            return Ok(());
        }

        let chars = panel.border.chars();
        let inner = panel.inner_size().0 as usize;
        let visible = (cols - panel.x) as usize;
        let horizontal = chars.horizontal.to_string().repeat(inner);
        let blank_line = " ".repeat(inner);

        // The label starts at the panel's own origin, over the top border,
        // and may use the full panel width.
        let label = clip_to_width(&panel.label, panel.width as usize);
        let top_border = format!("{}{}{}", chars.top_left, horizontal, chars.top_right);
        let top_rest: String = top_border.chars().skip(display_width(&label)).collect();

        for dy in 0..panel.height {
            let row = panel.y as u32 + dy as u32;
            if row >= rows as u32 {
                break;
            }
            let segments: Vec<(Color, String)> = if dy == 0 {
                vec![
                    (self.label_color, label.clone()),
                    (self.border_color, top_rest.clone()),
                ]
            } else if dy == panel.height - 1 {
                vec![
                    (self.border_color, chars.bottom_left.to_string()),
                    (self.border_color, horizontal.clone()),
                    (self.border_color, chars.bottom_right.to_string()),
                ]
            } else {
                vec![
                    (self.border_color, chars.vertical.to_string()),
                    (self.border_color, blank_line.clone()),
                    (self.border_color, chars.vertical.to_string()),
                ]
            };

            queue!(self.out, MoveTo(panel.x, row as u16))?;
            let mut remaining = visible;
            let mut current = None;
            for (color, text) in segments {
                let text = clip_to_width(&text, remaining);
                if text.is_empty() {
                    continue;
                }
                remaining -= display_width(&text);
                if current != Some(color) {
                    queue!(self.out, SetForegroundColor(color))?;
                    current = Some(color);
                }
                queue!(self.out, Print(text))?;
            }
        }
        queue!(self.out, ResetColor)?;
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.initialized {
            return Ok(());
        }
        self.initialized = false;

        let _ = queue!(
            self.out,
            ResetColor,
            SetAttribute(Attribute::Reset),
            Show,
            LeaveAlternateScreen
        );
        let _ = self.out.flush();

        // Disable raw mode - this is the most important part
        terminal::disable_raw_mode()
    }
}

impl<W: Write> Backend for CrosstermBackend<W> {
    fn initialize(&mut self) -> Result<()> {
        debug!("Enabling raw mode");
        terminal::enable_raw_mode().map_err(BackendError::Init)?;
        self.initialized = true;

        let (cols, rows) = terminal::size().map_err(BackendError::Init)?;
        self.screen.resize(cols, rows);

        queue!(self.out, EnterAlternateScreen, Clear(ClearType::All), MoveTo(0, 0))
            .map_err(BackendError::Init)?;
        self.out.flush().map_err(BackendError::Init)?;
        Ok(())
    }

    fn screen_size(&self) -> (u16, u16) {
        (self.screen.cols, self.screen.rows)
    }

    fn print_at(&mut self, x: u16, y: u16, text: &str) -> Result<()> {
        self.screen.put_str(x, y, text);
        self.dirty = true;
        Ok(())
    }

    fn create_panel(&mut self, panel: Panel) -> Result<PanelId> {
        let id = PanelId(self.next_id);
        self.next_id += 1;
        self.panels.push((id, panel));

        self.draw_panel(id)?;
        self.out.flush()?;
        Ok(id)
    }

    fn move_panel(&mut self, id: PanelId, x: u16, y: u16) -> Result<()> {
        self.panel_mut(id)?.move_to(x, y);
        Ok(())
    }

    fn touch_screen(&mut self) -> Result<()> {
        self.dirty = true;
        Ok(())
    }

    fn refresh_screen(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.dirty = false;

        queue!(self.out, ResetColor, Clear(ClearType::All))?;
        for y in 0..self.screen.rows {
            let text = self.screen.row_text(y);
            if !text.is_empty() {
                queue!(self.out, MoveTo(0, y), Print(text))?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn refresh_panel(&mut self, id: PanelId) -> Result<()> {
        self.draw_panel(id)?;
        self.out.flush()?;
        Ok(())
    }

    fn destroy_panel(&mut self, id: PanelId) -> Result<()> {
        let before = self.panels.len();
        self.panels.retain(|(pid, _)| *pid != id);
        if self.panels.len() == before {
            return Err(BackendError::UnknownPanel(id));
        }
        Ok(())
    }

    fn read_key(&mut self) -> Result<Key> {
        loop {
            let event = event::read()?;
            let Some(key) = KeyMapper::map_event(&event) else {
                continue;
            };
            if let Key::Resize(cols, rows) = key {
                debug!("Terminal resized to {}x{}", cols, rows);
                self.screen.resize(cols, rows);
                self.dirty = true;
            }
            return Ok(key);
        }
    }

    fn shutdown(&mut self) -> Result<()> {
        self.restore().map_err(BackendError::Restore)
    }
}

impl<W: Write> Drop for CrosstermBackend<W> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            error!("Failed to restore terminal: {}", e);
        }
    }
}
