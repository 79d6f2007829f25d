use clap::ValueEnum;
use crossterm::style::Color;
use serde::{Deserialize, Serialize};

/// Selectable color themes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeName {
    #[default]
    Green,
    Amber,
    HighContrast,
}

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color (header, words)
    pub fg: Color,
    /// Filler characters
    pub filler: Color,
    /// Address labels
    pub address: Color,
    /// Cursor cell background
    pub cursor_bg: Color,
    /// Background of the word under the cursor
    pub highlight_bg: Color,
    /// Denied entries and low attempts
    pub error: Color,
    /// Accepted password
    pub success: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::green()
    }
}

impl Theme {
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Green => Self::green(),
            ThemeName::Amber => Self::amber(),
            ThemeName::HighContrast => Self::high_contrast(),
        }
    }

    /// Green phosphor (default)
    pub fn green() -> Self {
        Self {
            bg: Color::Rgb { r: 8, g: 18, b: 10 },
            fg: Color::Rgb { r: 90, g: 255, b: 130 },
            filler: Color::Rgb { r: 40, g: 150, b: 70 },
            address: Color::Rgb { r: 60, g: 190, b: 95 },
            cursor_bg: Color::Rgb { r: 90, g: 255, b: 130 },
            highlight_bg: Color::Rgb { r: 30, g: 90, b: 45 },
            error: Color::Rgb { r: 255, g: 110, b: 90 },
            success: Color::Rgb { r: 200, g: 255, b: 200 },
            key: Color::Rgb { r: 170, g: 255, b: 190 },
        }
    }

    /// Amber monochrome
    pub fn amber() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 12, b: 4 },
            fg: Color::Rgb { r: 255, g: 190, b: 60 },
            filler: Color::Rgb { r: 170, g: 115, b: 30 },
            address: Color::Rgb { r: 210, g: 150, b: 45 },
            cursor_bg: Color::Rgb { r: 255, g: 190, b: 60 },
            highlight_bg: Color::Rgb { r: 100, g: 65, b: 15 },
            error: Color::Rgb { r: 255, g: 90, b: 60 },
            success: Color::Rgb { r: 255, g: 230, b: 170 },
            key: Color::Rgb { r: 255, g: 215, b: 120 },
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            filler: Color::Grey,
            address: Color::Cyan,
            cursor_bg: Color::Yellow,
            highlight_bg: Color::Blue,
            error: Color::Red,
            success: Color::Green,
            key: Color::Yellow,
        }
    }
}
