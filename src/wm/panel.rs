//! Panel - A bordered, movable region drawn over the base screen

/// Handle to a panel owned by the session's backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelId(pub u64);

impl std::fmt::Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "panel#{}", self.0)
    }
}

/// Border drawing style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    #[default]
    Single,
    Double,
    Rounded,
    Ascii,
}

impl BorderStyle {
    /// Parse a style name from the config file, falling back to `Single`
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "double" => BorderStyle::Double,
            "rounded" | "round" => BorderStyle::Rounded,
            "ascii" | "plain" => BorderStyle::Ascii,
            _ => BorderStyle::Single,
        }
    }

    /// Characters used to draw the border
    pub fn chars(self) -> BorderChars {
        match self {
            BorderStyle::Single => BorderChars {
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                horizontal: '─',
                vertical: '│',
            },
            BorderStyle::Double => BorderChars {
                top_left: '╔',
                top_right: '╗',
                bottom_left: '╚',
                bottom_right: '╝',
                horizontal: '═',
                vertical: '║',
            },
            BorderStyle::Rounded => BorderChars {
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                horizontal: '─',
                vertical: '│',
            },
            BorderStyle::Ascii => BorderChars {
                top_left: '+',
                top_right: '+',
                bottom_left: '+',
                bottom_right: '+',
                horizontal: '-',
                vertical: '|',
            },
        }
    }
}

/// Border characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

/// A rectangular bordered region with a fixed label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    /// Position (column, row) on the screen
    pub x: u16,
    pub y: u16,
    /// Size (width, height), fixed at creation
    pub width: u16,
    pub height: u16,
    /// Text drawn from the top-left cell, over the top border
    pub label: String,
    /// Border style
    pub border: BorderStyle,
}

impl Panel {
    /// Create a new panel at (`x`, `y`)
    pub fn new(height: u16, width: u16, y: u16, x: u16, label: impl Into<String>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            label: label.into(),
            border: BorderStyle::default(),
        }
    }

    pub fn with_border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    /// Get the inner dimensions (excluding border)
    pub fn inner_size(&self) -> (u16, u16) {
        (self.width.saturating_sub(2), self.height.saturating_sub(2))
    }

    /// Move the panel
    pub fn move_to(&mut self, x: u16, y: u16) {
        self.x = x;
        self.y = y;
    }
}
