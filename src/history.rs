//! Input history for the console input field
//!
//! Two independent histories are kept:
//!
//! - **Edit history**: snapshots of the input text for undo/redo while typing.
//!   Any fresh edit invalidates the redo stack.
//! - **Command history**: submitted commands, navigated with Up/Down. The text
//!   being typed before navigation started is restored when navigating past the
//!   newest command.
//!
//! Methods that change the input return the text the field should now show.
//! Applying that text does not count as an edit.

use crate::config::DEFAULT_MAX_COMMANDS;
use crate::error::{ConsoleError, Result};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;

/// Undo/redo and command navigation state
#[derive(Debug, Clone)]
pub struct InputHistory {
    undo_stack: Vec<String>,
    redo_stack: Vec<String>,
    last_snapshot: String,

    /// Oldest first
    commands: VecDeque<String>,
    /// Steps back from the newest command; `None` when not navigating
    index: Option<usize>,
    in_progress: String,
    max_commands: usize,
}

impl Default for InputHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_COMMANDS)
    }
}

impl InputHistory {
    pub fn new(max_commands: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            last_snapshot: String::new(),
            commands: VecDeque::new(),
            index: None,
            in_progress: String::new(),
            max_commands,
        }
    }

    // ==================== Edit history ====================

    /// Record the input text after a user edit
    pub fn on_text_changed(&mut self, text: &str) {
        if text != self.last_snapshot {
            let previous = std::mem::replace(&mut self.last_snapshot, text.to_string());
            self.undo_stack.push(previous);
            self.redo_stack.clear();
        }
    }

    /// Step back one edit; `current` is what the field shows now
    pub fn undo(&mut self, current: &str) -> Option<String> {
        let text = self.undo_stack.pop()?;
        self.redo_stack.push(current.to_string());
        Some(self.apply(text))
    }

    /// Re-apply an undone edit
    pub fn redo(&mut self, current: &str) -> Option<String> {
        let text = self.redo_stack.pop()?;
        self.undo_stack.push(current.to_string());
        Some(self.apply(text))
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Forget all edits, taking `current` as the new baseline
    pub fn clear_undo_history(&mut self, current: &str) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.last_snapshot = current.to_string();
    }

    // ==================== Command history ====================

    /// Remember a submitted command and stop navigating
    ///
    /// Blank commands are not stored. The oldest command is dropped once more than
    /// `max_commands` are kept.
    pub fn record_command(&mut self, command: &str) {
        if !command.trim().is_empty() {
            self.commands.push_back(command.to_string());
            self.truncate();
        }
        self.index = None;
        self.in_progress.clear();
    }

    /// Move to the next older command
    ///
    /// On the first step, `current` is saved so [`next_command`](Self::next_command) can restore it.
    /// Stays on the oldest command once reached.
    pub fn previous_command(&mut self, current: &str) -> Option<String> {
        if self.commands.is_empty() {
            return None;
        }

        let index = match self.index {
            None => {
                self.in_progress = current.to_string();
                0
            }
            Some(i) => (i + 1).min(self.commands.len() - 1),
        };
        self.index = Some(index);
        let text = self.command_at(index)?;
        Some(self.apply(text))
    }

    /// Move to the next newer command, or back to the in-progress text
    pub fn next_command(&mut self) -> Option<String> {
        let index = self.index?;

        let text = match index.checked_sub(1) {
            Some(newer) => {
                self.index = Some(newer);
                self.command_at(newer)?
            }
            None => {
                self.index = None;
                std::mem::take(&mut self.in_progress)
            }
        };
        Some(self.apply(text))
    }

    pub fn is_navigating(&self) -> bool {
        self.index.is_some()
    }

    pub fn clear_command_history(&mut self) {
        self.commands.clear();
        self.index = None;
        self.in_progress.clear();
    }

    /// Submitted commands, oldest first
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(String::as_str)
    }

    pub fn max_commands(&self) -> usize {
        self.max_commands
    }

    pub fn set_max_commands(&mut self, max_commands: usize) {
        self.max_commands = max_commands;
        self.truncate();
    }

    // ==================== Persistence ====================

    /// Load command history from a JSON file
    ///
    /// A missing file gives an empty history.
    pub fn load_from(path: impl AsRef<Path>, max_commands: usize) -> Result<Self> {
        let path = path.as_ref();
        let mut history = Self::new(max_commands);

        if !path.exists() {
            return Ok(history);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ConsoleError::Config(format!("Failed to read history {:?}: {}", path, e))
        })?;
        let file: HistoryFile = serde_json::from_str(&content).map_err(|e| {
            ConsoleError::Serialization(format!("Failed to parse history {:?}: {}", path, e))
        })?;

        for command in &file.commands {
            history.record_command(command);
        }
        tracing::debug!("Loaded {} commands from {:?}", history.commands.len(), path);
        Ok(history)
    }

    /// Save command history as JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = HistoryFile {
            version: 1,
            commands: self.commands.iter().cloned().collect(),
        };
        let content = serde_json::to_string_pretty(&file).map_err(|e| {
            ConsoleError::Serialization(format!("Failed to serialize history: {}", e))
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn command_at(&self, steps_back: usize) -> Option<String> {
        let idx = self.commands.len().checked_sub(steps_back + 1)?;
        self.commands.get(idx).cloned()
    }

    fn apply(&mut self, text: String) -> String {
        self.last_snapshot = text.clone();
        text
    }

    fn truncate(&mut self) {
        while self.commands.len() > self.max_commands {
            self.commands.pop_front();
        }
        if let Some(i) = self.index {
            if i >= self.commands.len() {
                self.index = self.commands.len().checked_sub(1);
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    commands: Vec<String>,
}
