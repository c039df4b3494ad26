//! Configuration management for wmove.
//!
//! Every setting is optional. Without a config file wmove behaves exactly
//! like the classic curses demo it mirrors: a 5x20 panel labelled
//! "CAN YOU SEE ME MOVE" starting at column 10, row 5.
//!
//! # Configuration File
//!
//! The configuration file is located at `~/.wmove/config.toml`:
//!
//! ```toml
//! hint = "PRINT q to EXIT"
//!
//! [panel]
//! height = 5
//! width = 20
//! start_x = 10
//! start_y = 5
//! label = "CAN YOU SEE ME MOVE"
//! border_style = "single"   # single, double, rounded, ascii
//!
//! [colors]
//! border = { r = 100, g = 150, b = 255 }
//! label = { r = 255, g = 255, b = 255 }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::wm::{BorderStyle, Panel};

/// Smallest panel that still fits a border and one label row
const MIN_HEIGHT: u16 = 3;
const MIN_WIDTH: u16 = 2;

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text printed at the top-left corner before the first key
    pub hint: String,
    /// Panel settings
    pub panel: PanelConfig,
    /// Optional colors; terminal defaults when absent
    pub colors: ColorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hint: "PRINT q to EXIT".to_string(),
            panel: PanelConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

/// Panel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub height: u16,
    pub width: u16,
    pub start_x: u16,
    pub start_y: u16,
    pub label: String,
    pub border_style: String, // "single", "double", "rounded", "ascii"
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            height: 5,
            width: 20,
            start_x: 10,
            start_y: 5,
            label: "CAN YOU SEE ME MOVE".to_string(),
            border_style: "single".to_string(),
        }
    }
}

impl PanelConfig {
    /// Build the panel described by this config
    pub fn to_panel(&self) -> Panel {
        Panel::new(
            self.height.max(MIN_HEIGHT),
            self.width.max(MIN_WIDTH),
            self.start_y,
            self.start_x,
            self.label.clone(),
        )
        .with_border(BorderStyle::by_name(&self.border_style))
    }
}

/// Color configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub border: Option<Color>,
    pub label: Option<Color>,
}

/// Color definition (RGB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[allow(dead_code)]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to crossterm Color
    pub fn to_crossterm(&self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

/// Convert an optional color, keeping the terminal default when unset
pub fn crossterm_color(color: Option<Color>) -> crossterm::style::Color {
    color
        .map(|c| c.to_crossterm())
        .unwrap_or(crossterm::style::Color::Reset)
}

impl Config {
    /// Load configuration from `~/.wmove/config.toml`, or defaults
    pub fn load() -> Self {
        match Self::get_config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a file; a missing or broken file gives defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match Self::parse(&content) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Get config file path
    fn get_config_path() -> Option<PathBuf> {
        data_dir().map(|dir| dir.join("config.toml"))
    }
}

/// `~/.wmove`, home of the config and log files
pub fn data_dir() -> Option<PathBuf> {
    home_dir().map(|home| home.join(".wmove"))
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_demo() {
        let config = Config::default();
        assert_eq!(config.hint, "PRINT q to EXIT");

        let panel = config.panel.to_panel();
        assert_eq!((panel.height, panel.width), (5, 20));
        assert_eq!((panel.x, panel.y), (10, 5));
        assert_eq!(panel.label, "CAN YOU SEE ME MOVE");
        assert_eq!(panel.border, BorderStyle::Single);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::parse(
            r#"
            [panel]
            width = 30
            border_style = "double"
            "#,
        )
        .unwrap();
        assert_eq!(config.panel.width, 30);
        assert_eq!(config.panel.height, 5);
        assert_eq!(config.hint, "PRINT q to EXIT");
        assert_eq!(config.panel.to_panel().border, BorderStyle::Double);
        assert_eq!(config.colors, ColorConfig::default());
    }

    #[test]
    fn test_unknown_border_style_is_single() {
        let config = Config::parse("[panel]\nborder_style = \"wavy\"\n").unwrap();
        assert_eq!(config.panel.to_panel().border, BorderStyle::Single);
    }

    #[test]
    fn test_colors() {
        let config = Config::parse("[colors]\nborder = { r = 1, g = 2, b = 3 }\n").unwrap();
        assert_eq!(config.colors.border, Some(Color::new(1, 2, 3)));
        assert_eq!(
            crossterm_color(config.colors.border),
            crossterm::style::Color::Rgb { r: 1, g: 2, b: 3 }
        );
        assert_eq!(crossterm_color(config.colors.label), crossterm::style::Color::Reset);
    }

    #[test]
    fn test_tiny_panel_is_clamped() {
        let config = Config::parse("[panel]\nheight = 0\nwidth = 1\n").unwrap();
        let panel = config.panel.to_panel();
        assert_eq!((panel.height, panel.width), (3, 2));
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = std::env::temp_dir().join(format!("wmove-config-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "panel = [not toml").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());

        fs::write(&path, "hint = \"press q\"\n").unwrap();
        assert_eq!(Config::load_from(&path).hint, "press q");

        let _ = fs::remove_dir_all(&dir);
        assert_eq!(Config::load_from(&path), Config::default());
    }
}
