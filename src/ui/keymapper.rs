//! Key mapping from crossterm events to mover keys
//!
//! The mover only understands a handful of keys. Everything else the
//! terminal reports is folded into `Key::Other` so it still triggers a
//! redraw, and events that are not key presses are dropped entirely.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

/// Keys understood by the mover loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// The quit key (`q`)
    Quit,
    /// Terminal was resized to (columns, rows)
    Resize(u16, u16),
    /// Any other key press
    Other,
}

/// Maps terminal events to `Key`
pub struct KeyMapper;

impl KeyMapper {
    /// Quit key, matching case-sensitively like the arrow-key loop it ends
    pub const QUIT: char = 'q';

    /// Map a terminal event. Returns `None` for events the loop never sees.
    pub fn map_event(event: &Event) -> Option<Key> {
        match event {
            Event::Key(key_event) => Self::map(key_event),
            Event::Resize(cols, rows) => Some(Key::Resize(*cols, *rows)),
            _ => None,
        }
    }

    /// Map a key event. Releases and repeats are ignored.
    pub fn map(event: &KeyEvent) -> Option<Key> {
        if event.kind != KeyEventKind::Press {
            return None;
        }

        let key = match event.code {
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Char(c) if c == Self::QUIT && event.modifiers.is_empty() => Key::Quit,
            _ => Key::Other,
        };
        Some(key)
    }
}
