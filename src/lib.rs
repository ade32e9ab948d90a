//! # Rhai Console: Live Scripting Console with Code Intelligence
//!
//! An embeddable scripting console for Rhai. Typed input is syntax highlighted and
//! auto-completed against the runtime's current namespace, including objects the
//! host application exposes.
//!
//! ## Architecture
//!
//! - **Lexer**: Position-tagged Rhai tokens that may halt on a lexical failure
//! - **Highlight**: Token stream + source text to `<color=#RRGGBB>…</color>` markup
//! - **Completion**: Cursor-adjacent path parsing, resolution and ranking
//! - **Scripting**: The Rhai runtime, host objects and console output channel
//! - **Console**: Session glue (history, output log, assistance)
//! - **Frontend**: The eframe/egui console window
//!
//! Highlighting and completion are pure functions of the current text, cursor
//! and runtime state; they never fail, they degrade to raw or empty output.
//!
//! ## Configuration
//!
//! Configuration and command history live in the platform data directory under
//! `dev.hxyulin.rhai-console` (see [`config`]).
//!
//! ## Example
//!
//! ```
//! use rhai_console::config::ConsoleConfig;
//! use rhai_console::console::ConsoleSession;
//!
//! let mut session = ConsoleSession::from_config(&ConsoleConfig::default());
//! session.submit("let player = #{ name: \"ada\", health: 10 };").unwrap();
//!
//! let assist = session.assist("player.he", 9);
//! assert_eq!(assist.closest.as_deref(), Some("health"));
//! assert!(session.highlight("player").starts_with("<color="));
//! ```

pub mod completion;
pub mod config;
pub mod console;
pub mod error;
pub mod frontend;
pub mod highlight;
pub mod history;
pub mod lexer;
pub mod scripting;

// Re-export commonly used types
pub use completion::{Namespace, ResolvedValue, Suggestor};
pub use config::{ColorTheme, ConsoleConfig};
pub use console::{Assist, ConsoleSession};
pub use error::{ConsoleError, Result};
pub use frontend::ConsoleApp;
pub use highlight::{ColorMap, HexColor, Highlighter};
pub use history::InputHistory;
pub use scripting::{ConsoleEnvironment, ConsoleOutput, HostObject, RhaiConsole};
