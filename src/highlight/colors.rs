//! Token colors
//!
//! [`ColorMap`] is built once at startup (usually from the configured
//! [`ColorTheme`]) and then only read. It is passed by reference into every
//! [`Highlighter`](super::Highlighter).

use crate::config::ColorTheme;
use crate::error::{ConsoleError, Result};
use crate::lexer::{TokenCategory, TokenKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// An opaque RGB color, written as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional)
    pub fn parse(text: &str) -> Result<Self> {
        let hex = text.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConsoleError::Theme(format!(
                "Invalid color '{}', expected #RRGGBB",
                text
            )));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| ConsoleError::Theme(format!("Invalid color '{}': {}", text, e)))
        };

        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ConsoleError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

/// Mapping from token kind to display color, with a fallback for everything else
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMap {
    colors: HashMap<TokenKind, HexColor>,
    fallback: HexColor,
}

impl ColorMap {
    /// An empty map: every kind renders in `fallback`
    pub fn new(fallback: HexColor) -> Self {
        Self {
            colors: HashMap::new(),
            fallback,
        }
    }

    /// Build a map from a theme, coloring every kind by its category
    pub fn from_theme(theme: &ColorTheme) -> Self {
        let mut map = Self::new(theme.fallback);
        for kind in TokenKind::ALL {
            map.colors
                .insert(*kind, theme.category_color(kind.category()));
        }
        map
    }

    /// Color every kind in `category`
    pub fn with_category(mut self, category: TokenCategory, color: HexColor) -> Self {
        for kind in TokenKind::ALL.iter().filter(|k| k.category() == category) {
            self.colors.insert(*kind, color);
        }
        self
    }

    /// Color a single kind
    pub fn with_kind(mut self, kind: TokenKind, color: HexColor) -> Self {
        self.colors.insert(kind, color);
        self
    }

    pub fn color_for(&self, kind: TokenKind) -> HexColor {
        self.colors.get(&kind).copied().unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> HexColor {
        self.fallback
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::from_theme(&ColorTheme::default())
    }
}
