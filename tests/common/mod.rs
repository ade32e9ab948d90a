//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;
pub mod mock_helpers;

use crossbeam_channel::Receiver;
use rhai_console::config::ScriptLimits;
use rhai_console::{ConsoleOutput, RhaiConsole};

/// Create a Rhai console with default limits
pub fn test_console() -> (RhaiConsole, Receiver<ConsoleOutput>) {
    RhaiConsole::new(&ScriptLimits::default())
}

/// Drain pending output as the text shown in the log
pub fn drain_output(rx: &Receiver<ConsoleOutput>) -> Vec<String> {
    rx.try_iter().map(|o| o.display_text()).collect()
}

/// Character offset of the end of `text`, for placing the cursor there
pub fn end_of(text: &str) -> usize {
    text.chars().count()
}
