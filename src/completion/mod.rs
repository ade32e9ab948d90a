//! Code completion against the live script namespace
//!
//! Completion works on the expression directly left of the cursor:
//!
//! 1. [`parse_word_path`] splits e.g. `Scene.Utils.fi` into the base path
//!    `Scene.Utils` and the prefix `fi`.
//! 2. [`resolve_value`] walks the base path from the namespace root through object
//!    maps and host objects, giving a [`ResolvedValue`].
//! 3. [`Suggestor`] filters the resolved value's member names by the prefix and
//!    ranks shorter names first.
//!
//! Every query starts again from [`Namespace::root`]; nothing is cached between
//! keystrokes. Misses are data ([`ResolvedValue::Absent`]), never errors.
//!
//! ## Example
//!
//! ```
//! use rhai::{Dynamic, Map};
//! use rhai_console::completion::Suggestor;
//!
//! let mut root = Map::new();
//! root.insert("log".into(), Dynamic::UNIT);
//! root.insert("hello".into(), Dynamic::UNIT);
//!
//! let suggestor = Suggestor::new(&root);
//! assert_eq!(suggestor.get_suggestions("h", 1), vec!["hello"]);
//! ```

mod path;
mod resolve;
mod suggest;

pub use path::{parse_word_path, AccessStyle, SymbolPath};
pub use resolve::{resolve_value, Namespace, ResolvedValue};
pub use suggest::{rank, Suggestor};
