//! Recording backend for tests

use std::collections::VecDeque;

use super::backend::{Backend, BackendError, Result};
use crate::ui::Key;
use crate::wm::{Panel, PanelId};

/// One recorded backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Initialize,
    PrintAt(u16, u16, String),
    CreatePanel(Panel),
    MovePanel(PanelId, u16, u16),
    TouchScreen,
    RefreshScreen,
    RefreshPanel(PanelId),
    DestroyPanel(PanelId),
    ReadKey,
    Shutdown,
}

/// Backend that replays scripted keys and records every call.
///
/// Running out of scripted keys yields `Key::Quit` so a test can never hang.
pub struct FakeBackend {
    pub cols: u16,
    pub rows: u16,
    pub keys: VecDeque<Key>,
    pub calls: Vec<Call>,
    pub panels: Vec<(PanelId, Panel)>,
    next_id: u64,
}

impl FakeBackend {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            keys: VecDeque::new(),
            calls: Vec::new(),
            panels: Vec::new(),
            next_id: 1,
        }
    }

    pub fn with_keys(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.keys.extend(keys);
        self
    }

    pub fn count(&self, wanted: &Call) -> usize {
        self.calls.iter().filter(|c| *c == wanted).count()
    }

    pub fn count_matching(&self, f: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| f(c)).count()
    }

    /// Every text printed at the origin, in order
    pub fn readouts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::PrintAt(0, 0, text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Backend for FakeBackend {
    fn initialize(&mut self) -> Result<()> {
        self.calls.push(Call::Initialize);
        Ok(())
    }

    fn screen_size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    fn print_at(&mut self, x: u16, y: u16, text: &str) -> Result<()> {
        self.calls.push(Call::PrintAt(x, y, text.to_string()));
        Ok(())
    }

    fn create_panel(&mut self, panel: Panel) -> Result<PanelId> {
        let id = PanelId(self.next_id);
        self.next_id += 1;
        self.calls.push(Call::CreatePanel(panel.clone()));
        self.panels.push((id, panel));
        Ok(id)
    }

    fn move_panel(&mut self, id: PanelId, x: u16, y: u16) -> Result<()> {
        self.calls.push(Call::MovePanel(id, x, y));
        let (_, panel) = self
            .panels
            .iter_mut()
            .find(|(pid, _)| *pid == id)
            .ok_or(BackendError::UnknownPanel(id))?;
        panel.move_to(x, y);
        Ok(())
    }

    fn touch_screen(&mut self) -> Result<()> {
        self.calls.push(Call::TouchScreen);
        Ok(())
    }

    fn refresh_screen(&mut self) -> Result<()> {
        self.calls.push(Call::RefreshScreen);
        Ok(())
    }

    fn refresh_panel(&mut self, id: PanelId) -> Result<()> {
        self.calls.push(Call::RefreshPanel(id));
        Ok(())
    }

    fn destroy_panel(&mut self, id: PanelId) -> Result<()> {
        self.calls.push(Call::DestroyPanel(id));
        let before = self.panels.len();
        self.panels.retain(|(pid, _)| *pid != id);
        if self.panels.len() == before {
            return Err(BackendError::UnknownPanel(id));
        }
        Ok(())
    }

    fn read_key(&mut self) -> Result<Key> {
        self.calls.push(Call::ReadKey);
        let key = self.keys.pop_front().unwrap_or(Key::Quit);
        if let Key::Resize(cols, rows) = key {
            self.cols = cols;
            self.rows = rows;
        }
        Ok(key)
    }

    fn shutdown(&mut self) -> Result<()> {
        self.calls.push(Call::Shutdown);
        Ok(())
    }
}
