//! Settings groups that make up the console configuration
//!
//! # Main Types
//!
//! - [`EditorPreferences`] - Input field, preview and suggestion popup options
//! - [`HistorySettings`] - Command history length and persistence
//! - [`ScriptLimits`] - Safety limits applied to the Rhai engine
//! - [`WindowState`] - Initial console window geometry

use serde::{Deserialize, Serialize};

/// Default number of submitted commands kept for Up/Down navigation
pub const DEFAULT_MAX_COMMANDS: usize = 100;

/// Input field and assistance options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorPreferences {
    /// Enable dark mode
    #[serde(default = "default_true")]
    pub dark_mode: bool,

    /// Monospace font size of the input and output
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Show the highlighted preview under the input field
    #[serde(default = "default_true")]
    pub show_highlight_preview: bool,

    /// Show the suggestion popup while typing
    #[serde(default = "default_true")]
    pub show_suggestions: bool,

    /// Maximum rows in the suggestion popup
    #[serde(default = "default_max_visible_suggestions")]
    pub max_visible_suggestions: usize,

    /// Maximum lines kept in the output log
    #[serde(default = "default_max_output_lines")]
    pub max_output_lines: usize,
}

fn default_true() -> bool {
    true
}

fn default_font_size() -> f32 {
    13.0
}

fn default_max_visible_suggestions() -> usize {
    8
}

fn default_max_output_lines() -> usize {
    1_000
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            font_size: default_font_size(),
            show_highlight_preview: true,
            show_suggestions: true,
            max_visible_suggestions: default_max_visible_suggestions(),
            max_output_lines: default_max_output_lines(),
        }
    }
}

/// Command history options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Maximum number of submitted commands to remember
    #[serde(default = "default_max_commands")]
    pub max_commands: usize,

    /// Save command history between sessions
    #[serde(default = "default_true")]
    pub persist: bool,
}

fn default_max_commands() -> usize {
    DEFAULT_MAX_COMMANDS
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_commands: DEFAULT_MAX_COMMANDS,
            persist: true,
        }
    }
}

/// Safety limits for evaluating console input
///
/// These bound how much work a single submission can do so that a runaway loop
/// typed into the console cannot hang the UI thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptLimits {
    pub max_operations: u64,
    pub max_call_levels: usize,
    pub max_expr_depth: usize,
    pub max_function_expr_depth: usize,
    pub max_string_size: usize,
    pub max_array_size: usize,
    pub max_map_size: usize,
}

impl Default for ScriptLimits {
    fn default() -> Self {
        Self {
            max_operations: 1_000_000,
            max_call_levels: 64,
            max_expr_depth: 64,
            max_function_expr_depth: 64,
            max_string_size: 1_000_000,
            max_array_size: 100_000,
            max_map_size: 100_000,
        }
    }
}

/// Window size at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowState {
    /// Window size (width, height)
    #[serde(default = "default_window_size")]
    pub size: (f32, f32),
}

fn default_window_size() -> (f32, f32) {
    (900.0, 600.0)
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            size: default_window_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let prefs: EditorPreferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs, EditorPreferences::default());

        let history: HistorySettings = serde_json::from_str("{}").unwrap();
        assert_eq!(history.max_commands, DEFAULT_MAX_COMMANDS);
        assert!(history.persist);

        let limits: ScriptLimits = serde_json::from_str("{\"max_operations\": 5}").unwrap();
        assert_eq!(limits.max_operations, 5);
        assert_eq!(limits.max_call_levels, ScriptLimits::default().max_call_levels);
    }
}
