//! Color themes for the console highlighter
//!
//! A theme assigns one color per [`TokenCategory`]. Themes are part of the
//! console configuration and can also be shared as standalone TOML files:
//!
//! ```toml
//! keyword = "#569CD6"
//! name = "#9CDCFE"
//! string = "#D69D85"
//! fallback = "#AAAAAA"
//! ```
//!
//! Missing entries keep their default color.

use crate::error::{ConsoleError, Result};
use crate::highlight::HexColor;
use crate::lexer::TokenCategory;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-category token colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorTheme {
    pub keyword: HexColor,
    pub operator: HexColor,
    pub punctuation: HexColor,
    pub bracket: HexColor,
    pub string: HexColor,
    pub number: HexColor,
    pub comment: HexColor,
    pub name: HexColor,
    pub eof: HexColor,
    pub invalid: HexColor,
    /// Used for raw passthrough text and any kind without a color
    pub fallback: HexColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            keyword: HexColor::rgb(0x56, 0x9C, 0xD6),     // Blue
            operator: HexColor::rgb(0xC5, 0x86, 0xC0),    // Purple
            punctuation: HexColor::rgb(0xC5, 0xC5, 0xC5), // Gray
            bracket: HexColor::rgb(0xD4, 0xD4, 0xD4),     // Light gray
            string: HexColor::rgb(0xD6, 0x9D, 0x85),      // Orange
            number: HexColor::rgb(0xB5, 0xCE, 0xA8),      // Light green
            comment: HexColor::rgb(0x6A, 0x99, 0x55),     // Green
            name: HexColor::rgb(0x9C, 0xDC, 0xFE),        // Light blue
            eof: HexColor::rgb(0x80, 0x80, 0x80),
            invalid: HexColor::rgb(0xFF, 0x00, 0x00),
            fallback: HexColor::rgb(0xAA, 0xAA, 0xAA),
        }
    }
}

impl ColorTheme {
    /// A palette readable on light backgrounds
    pub fn light() -> Self {
        Self {
            keyword: HexColor::rgb(0x00, 0x00, 0xFF),
            operator: HexColor::rgb(0xAF, 0x00, 0xDB),
            punctuation: HexColor::rgb(0x3B, 0x3B, 0x3B),
            bracket: HexColor::rgb(0x31, 0x31, 0x31),
            string: HexColor::rgb(0xA3, 0x15, 0x15),
            number: HexColor::rgb(0x09, 0x86, 0x58),
            comment: HexColor::rgb(0x00, 0x80, 0x00),
            name: HexColor::rgb(0x00, 0x00, 0x00),
            eof: HexColor::rgb(0x80, 0x80, 0x80),
            invalid: HexColor::rgb(0xE5, 0x14, 0x00),
            fallback: HexColor::rgb(0x6E, 0x6E, 0x6E),
        }
    }

    pub fn category_color(&self, category: TokenCategory) -> HexColor {
        match category {
            TokenCategory::Keyword => self.keyword,
            TokenCategory::Operator => self.operator,
            TokenCategory::Punctuation => self.punctuation,
            TokenCategory::Bracket => self.bracket,
            TokenCategory::String => self.string,
            TokenCategory::Number => self.number,
            TokenCategory::Comment => self.comment,
            TokenCategory::Name => self.name,
            TokenCategory::Eof => self.eof,
            TokenCategory::Invalid => self.invalid,
        }
    }

    /// Parse a theme from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ConsoleError::Theme(format!("Failed to parse theme: {}", e)))
    }

    /// Serialize the theme as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ConsoleError::Serialization(format!("Failed to serialize theme: {}", e)))
    }

    /// Load a theme from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConsoleError::Theme(format!("Failed to read theme file {:?}: {}", path, e))
        })?;
        Self::from_toml_str(&content)
    }
}
