//! Parsing of the expression to the left of the cursor

/// Which separator preceded the prefix
///
/// Recorded for callers; resolution and filtering treat both the same because
/// Rhai uses `::` for module paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessStyle {
    /// `.` or no separator at all
    #[default]
    Field,
    /// `:` or `::`
    Method,
}

impl AccessStyle {
    fn from_separator(c: char) -> Self {
        if c == ':' {
            AccessStyle::Method
        } else {
            AccessStyle::Field
        }
    }
}

/// The cursor-adjacent expression split into base path and prefix
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolPath {
    /// Everything before the rightmost separator; `None` resolves against the root
    pub base_path: Option<String>,
    /// The partially typed name after the rightmost separator
    pub prefix: String,
    pub access: AccessStyle,
}

impl SymbolPath {
    /// True when there is nothing to complete: no (or an empty) base path and no prefix
    pub fn is_empty_context(&self) -> bool {
        self.prefix.is_empty() && self.base_path.as_deref().map_or(true, str::is_empty)
    }
}

/// End of the base path for the separator at `split`; a `::` pair is one separator
fn base_end(word: &[char], split: usize) -> usize {
    if word[split] == ':' && split > 0 && word[split - 1] == ':' {
        split - 1
    } else {
        split
    }
}

pub(crate) fn is_separator(c: char) -> bool {
    c == '.' || c == ':'
}

fn is_path_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || is_separator(c)
}

/// Parse the expression ending at `cursor` (a character offset, clamped to the text)
pub fn parse_word_path(text: &str, cursor: usize) -> SymbolPath {
    let before: Vec<char> = text.chars().take(cursor).collect();

    let start = before
        .iter()
        .rposition(|&c| !is_path_char(c))
        .map_or(0, |i| i + 1);
    let word = &before[start..];

    match word.iter().rposition(|&c| is_separator(c)) {
        Some(split) => SymbolPath {
            base_path: Some(word[..base_end(word, split)].iter().collect()),
            prefix: word[split + 1..].iter().collect(),
            access: AccessStyle::from_separator(word[split]),
        },
        None => SymbolPath {
            base_path: None,
            prefix: word.iter().collect(),
            access: AccessStyle::Field,
        },
    }
}
