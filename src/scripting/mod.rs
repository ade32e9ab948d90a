//! Rhai Scripting Runtime for the Console
//!
//! This module provides the runtime that evaluates console input and supplies the
//! namespace that completions resolve against.
//!
//! ## Main Types
//!
//! - [`ConsoleEnvironment`] - What the console needs from a scripting runtime
//! - [`RhaiConsole`] - The Rhai implementation, with a persistent scope
//! - [`HostObject`] / [`ForeignObject`] - Native objects exposed to scripts
//! - [`ConsoleOutput`] - Lines produced by evaluation, sent over a channel
//!
//! ## Example Session
//!
//! ```rhai
//! let player = #{ name: "ada", stats: #{ hp: 10 } };
//! player.stats.hp + 1     // => 11
//! log("saved");           // [Rhai] saved
//! Console.uptime_secs     // => 12.5
//! ```

mod engine;
mod foreign;
mod host;

pub use engine::RhaiConsole;
pub use foreign::{ForeignObject, HostObject};
pub use host::ConsoleInfo;

#[cfg(test)]
pub use foreign::MockHostObject;

use crate::completion::Namespace;
use crate::error::Result;
use chrono::{DateTime, Local};

/// A scripting runtime the console can drive
///
/// Output is not returned from [`execute`](Self::execute); implementations send it
/// to whoever holds their output receiver.
pub trait ConsoleEnvironment: Namespace {
    /// Evaluate one submission
    ///
    /// Failures are reported as `Error: ...` output and also returned.
    fn execute(&mut self, input: &str) -> Result<()>;

    /// Drop all user state and start over
    fn reset(&mut self);
}

/// Kind of console output line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Value of an evaluated expression
    Result,
    /// Text printed by the script
    Print,
    /// Evaluation failure
    Error,
}

/// One line of console output
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleOutput {
    pub kind: OutputKind,
    pub text: String,
    pub at: DateTime<Local>,
}

impl ConsoleOutput {
    pub fn new(kind: OutputKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            at: Local::now(),
        }
    }

    /// Text as shown in the output log; results get a `=> ` prefix
    pub fn display_text(&self) -> String {
        match self.kind {
            OutputKind::Result => format!("=> {}", self.text),
            OutputKind::Print | OutputKind::Error => self.text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text() {
        assert_eq!(ConsoleOutput::new(OutputKind::Result, "1").display_text(), "=> 1");
        assert_eq!(ConsoleOutput::new(OutputKind::Print, "hi").display_text(), "hi");
        assert_eq!(
            ConsoleOutput::new(OutputKind::Error, "Error: x").display_text(),
            "Error: x"
        );
    }
}
