//! Console session: the glue between input field, runtime and code intelligence
//!
//! A [`ConsoleSession`] owns the scripting environment, its output receiver, the
//! color map and the input history. The frontend calls into it on every keystroke
//! ([`assist`](ConsoleSession::assist), [`segments`](ConsoleSession::segments)) and
//! on submit. Highlighting and completion are independent passes over the text.

use crate::completion::Suggestor;
use crate::config::ConsoleConfig;
use crate::error::Result;
use crate::highlight::{ColorMap, Highlighted, Highlighter};
use crate::history::InputHistory;
use crate::scripting::{ConsoleEnvironment, ConsoleOutput, RhaiConsole};
use crossbeam_channel::Receiver;
use std::collections::VecDeque;

/// Completion help for one cursor position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assist {
    /// Best completion, if any
    pub closest: Option<String>,
    /// All completions, shortest first
    pub suggestions: Vec<String>,
}

impl Assist {
    pub fn is_empty(&self) -> bool {
        self.closest.is_none() && self.suggestions.is_empty()
    }
}

/// A running console
pub struct ConsoleSession<E: ConsoleEnvironment = RhaiConsole> {
    environment: E,
    output_rx: Receiver<ConsoleOutput>,
    colors: ColorMap,
    history: InputHistory,
    output: VecDeque<ConsoleOutput>,
    max_output_lines: usize,
}

impl ConsoleSession<RhaiConsole> {
    /// Build a Rhai console session from configuration
    ///
    /// Command history is not loaded here; see [`InputHistory::load_from`].
    pub fn from_config(config: &ConsoleConfig) -> Self {
        let (environment, output_rx) = RhaiConsole::new(&config.limits);
        let mut session = Self::new(
            environment,
            output_rx,
            ColorMap::from_theme(&config.effective_theme()),
        );
        session.history.set_max_commands(config.history.max_commands);
        session.max_output_lines = config.editor.max_output_lines;
        session
    }
}

impl<E: ConsoleEnvironment> ConsoleSession<E> {
    /// Default number of output lines kept
    pub const DEFAULT_MAX_OUTPUT_LINES: usize = 1_000;

    pub fn new(environment: E, output_rx: Receiver<ConsoleOutput>, colors: ColorMap) -> Self {
        Self {
            environment,
            output_rx,
            colors,
            history: InputHistory::default(),
            output: VecDeque::new(),
            max_output_lines: Self::DEFAULT_MAX_OUTPUT_LINES,
        }
    }

    /// Completions for the expression ending at `cursor` (a character offset)
    pub fn assist(&self, text: &str, cursor: usize) -> Assist {
        let suggestor = Suggestor::new(&self.environment);
        Assist {
            closest: suggestor.closest_suggestion(text, cursor),
            suggestions: suggestor.get_suggestions(text, cursor),
        }
    }

    /// Highlight `text` into color markup
    pub fn highlight(&self, text: &str) -> String {
        Highlighter::new(&self.colors).highlight(text)
    }

    /// Highlight `text` into colored segments
    pub fn segments<'s>(&self, text: &'s str) -> Highlighted<'s> {
        Highlighter::new(&self.colors).segments(text)
    }

    /// Run a submitted command
    ///
    /// The command is recorded in the history and the edit history is cleared
    /// whether or not evaluation succeeds.
    pub fn submit(&mut self, text: &str) -> Result<()> {
        tracing::debug!("Submitting console input ({} chars)", text.len());
        self.history.record_command(text);
        self.history.clear_undo_history("");
        let result = self.environment.execute(text);
        self.poll_output();
        result
    }

    /// Move pending output into the log; returns how many lines arrived
    pub fn poll_output(&mut self) -> usize {
        let mut received = 0;
        for line in self.output_rx.try_iter() {
            self.output.push_back(line);
            received += 1;
        }
        while self.output.len() > self.max_output_lines {
            self.output.pop_front();
        }
        received
    }

    /// Output lines, oldest first
    pub fn output(&self) -> impl Iterator<Item = &ConsoleOutput> {
        self.output.iter()
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    /// Reset the environment and clear the output log
    pub fn reset(&mut self) {
        self.environment.reset();
        self.output.clear();
        // Drop anything sent before the reset
        for _ in self.output_rx.try_iter() {}
    }

    pub fn history(&self) -> &InputHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut InputHistory {
        &mut self.history
    }

    pub fn set_history(&mut self, history: InputHistory) {
        self.history = history;
    }

    pub fn environment(&self) -> &E {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut E {
        &mut self.environment
    }

    pub fn colors(&self) -> &ColorMap {
        &self.colors
    }

    pub fn set_colors(&mut self, colors: ColorMap) {
        self.colors = colors;
    }

    pub fn set_max_output_lines(&mut self, max: usize) {
        self.max_output_lines = max;
        while self.output.len() > self.max_output_lines {
            self.output.pop_front();
        }
    }
}
