//! Configuration module for the Rhai console
//!
//! This module handles:
//! - Console configuration persistence (theme, editor options, history, limits)
//! - Color themes, also loadable from standalone TOML files
//!
//! # App Data Location
//!
//! Application data is stored in the platform-appropriate location:
//! - **Linux**: `~/.local/share/dev.hxyulin.rhai-console/`
//! - **macOS**: `~/Library/Application Support/dev.hxyulin.rhai-console/`
//! - **Windows**: `%APPDATA%\dev.hxyulin.rhai-console\`
//!
//! # Files
//!
//! - `console_config.json` - The [`ConsoleConfig`]
//! - `history.json` - Submitted commands (see [`crate::history`])
//! - `logs/` - Rolling log files written by the binary
//!
//! # Example
//!
//! ```ignore
//! use rhai_console::config::ConsoleConfig;
//!
//! let mut config = ConsoleConfig::load_or_default();
//! config.editor.font_size = 15.0;
//! config.save()?;
//! ```

pub mod settings;
mod theme;

pub use settings::*;
pub use theme::ColorTheme;

use crate::error::{ConsoleError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for data directories
pub const APP_ID: &str = "dev.hxyulin.rhai-console";

/// Console configuration filename
pub const CONFIG_FILE: &str = "console_config.json";

/// Command history filename
pub const HISTORY_FILE: &str = "history.json";

/// Log directory name
pub const LOG_DIR: &str = "logs";

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        ConsoleError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            ConsoleError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the console configuration file
pub fn config_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(CONFIG_FILE))
}

/// Get the path to the command history file
pub fn history_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(HISTORY_FILE))
}

// ==================== Console Config ====================

/// Persistent console configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Version for future migration support
    #[serde(default = "default_config_version")]
    pub version: u32,

    /// Token colors
    #[serde(default)]
    pub theme: ColorTheme,

    /// Optional TOML theme file that overrides `theme` when it loads
    #[serde(default)]
    pub theme_file: Option<PathBuf>,

    /// Input field and assistance options
    #[serde(default)]
    pub editor: EditorPreferences,

    /// Command history options
    #[serde(default)]
    pub history: HistorySettings,

    /// Engine safety limits
    #[serde(default)]
    pub limits: ScriptLimits,

    /// Window geometry
    #[serde(default)]
    pub window: WindowState,
}

fn default_config_version() -> u32 {
    1
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            version: 1,
            theme: ColorTheme::default(),
            theme_file: None,
            editor: EditorPreferences::default(),
            history: HistorySettings::default(),
            limits: ScriptLimits::default(),
            window: WindowState::default(),
        }
    }
}

impl ConsoleConfig {
    /// Load the configuration from the default location
    pub fn load() -> Result<Self> {
        let path = config_path().ok_or_else(|| {
            ConsoleError::Config("Could not determine config path".to_string())
        })?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load the configuration, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load console config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Load the configuration from a specific file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConsoleError::Config(format!("Failed to read config {:?}: {}", path, e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            ConsoleError::Config(format!("Failed to parse config {:?}: {}", path, e))
        })
    }

    /// Save the configuration to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(dir.join(CONFIG_FILE))
    }

    /// Save the configuration to a specific file
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConsoleError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| {
            ConsoleError::Serialization(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content).map_err(|e| {
            ConsoleError::Config(format!("Failed to write config {:?}: {}", path, e))
        })?;

        tracing::debug!("Saved console config to {:?}", path);
        Ok(())
    }

    /// The theme to highlight with: the theme file if it loads, else `theme`
    pub fn effective_theme(&self) -> ColorTheme {
        match &self.theme_file {
            Some(path) => ColorTheme::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load theme file, using configured theme: {}", e);
                self.theme.clone()
            }),
            None => self.theme.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::HexColor;

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let mut config = ConsoleConfig::default();
        config.editor.font_size = 16.0;
        config.history.max_commands = 5;
        config.theme.keyword = HexColor::rgb(1, 2, 3);
        config.save_to(&path).unwrap();

        let loaded = ConsoleConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: ConsoleConfig = serde_json::from_str("{\"version\": 1}").unwrap();
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn test_load_from_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "not json").unwrap();

        let err = ConsoleConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_effective_theme_prefers_theme_file() {
        let dir = tempfile::tempdir().unwrap();
        let theme_path = dir.path().join("theme.toml");
        std::fs::write(&theme_path, "name = \"#010203\"\n").unwrap();

        let mut config = ConsoleConfig::default();
        assert_eq!(config.effective_theme(), ColorTheme::default());

        config.theme_file = Some(theme_path);
        assert_eq!(config.effective_theme().name, HexColor::rgb(1, 2, 3));

        config.theme_file = Some(dir.path().join("missing.toml"));
        assert_eq!(config.effective_theme(), config.theme);
    }
}
