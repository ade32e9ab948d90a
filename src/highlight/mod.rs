//! Highlight Renderer
//!
//! Turns console input into color-annotated spans. Each token is rendered together
//! with the whitespace that precedes it: the span runs from the end of the previous
//! token to the end of this one, so no separate trivia spans are needed and the
//! concatenated span text is always the original input.
//!
//! When the tokenizer halts on a lexical failure the rest of the input is emitted
//! as a single span in the fallback color. The failure itself is never reported to
//! the caller, since the console keeps highlighting whatever the user is typing.
//!
//! ## Example
//!
//! ```
//! use rhai_console::highlight::{strip_markup, ColorMap, Highlighter};
//!
//! let colors = ColorMap::default();
//! let highlighter = Highlighter::new(&colors);
//!
//! let markup = highlighter.highlight("let x = 1;");
//! assert!(markup.starts_with("<color=#569CD6>let</color>"));
//! assert_eq!(strip_markup(&markup), "let x = 1;");
//! ```

mod colors;
pub mod markup;

pub use colors::{ColorMap, HexColor};
pub use markup::strip_markup;

use crate::lexer::{LexError, RhaiTokenizer, TokenKind, TokenScan, Tokenizer};

/// A run of source text rendered in one color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'s> {
    pub color: HexColor,
    /// Unescaped source text
    pub text: &'s str,
    /// Token that ends this segment; `None` for raw passthrough text
    pub kind: Option<TokenKind>,
}

/// Result of highlighting one input text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlighted<'s> {
    pub segments: Vec<Segment<'s>>,
    /// Set when tokenizing stopped early; the last segment is then the raw remainder
    pub halted: Option<LexError>,
}

impl Highlighted<'_> {
    /// Render as `<color=#RRGGBB>…</color>` spans in source order
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            markup::push_span(&mut out, segment.color, segment.text);
        }
        out
    }

    /// The source text, reassembled from the segments
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.halted.is_none()
    }
}

/// Byte offsets of line starts, for turning token positions into slices
struct LineIndex<'s> {
    source: &'s str,
    starts: Vec<usize>,
}

impl<'s> LineIndex<'s> {
    fn new(source: &'s str) -> Self {
        let mut starts = vec![0];
        starts.extend(source.match_indices('\n').map(|(i, _)| i + 1));
        Self { source, starts }
    }

    /// Byte offset of a 1-based line and 0-based character column
    ///
    /// Columns past the end of a line clamp to the line end (before its `\n`) and
    /// lines past the end of the text clamp to the text end.
    fn offset(&self, line: usize, col: usize) -> usize {
        let line = line.max(1);
        let Some(&start) = self.starts.get(line - 1) else {
            return self.source.len();
        };
        let end = self
            .starts
            .get(line)
            .map(|next| next - 1)
            .unwrap_or(self.source.len());

        self.source[start..end]
            .char_indices()
            .nth(col)
            .map(|(i, _)| start + i)
            .unwrap_or(end)
    }
}

/// Renders source text into colored segments using a [`ColorMap`] and a tokenizer
pub struct Highlighter<'c, T = RhaiTokenizer> {
    colors: &'c ColorMap,
    tokenizer: T,
}

impl<'c> Highlighter<'c> {
    /// Highlighter for Rhai source
    pub fn new(colors: &'c ColorMap) -> Self {
        Self::with_tokenizer(colors, RhaiTokenizer)
    }
}

impl<'c, T: Tokenizer> Highlighter<'c, T> {
    pub fn with_tokenizer(colors: &'c ColorMap, tokenizer: T) -> Self {
        Self { colors, tokenizer }
    }

    pub fn colors(&self) -> &ColorMap {
        self.colors
    }

    /// Highlight `code` into markup; empty input gives empty output
    pub fn highlight(&self, code: &str) -> String {
        self.segments(code).to_markup()
    }

    /// Highlight `code` into segments
    pub fn segments<'s>(&self, code: &'s str) -> Highlighted<'s> {
        if code.is_empty() {
            return Highlighted::default();
        }

        let lines = LineIndex::new(code);
        let mut stream = self.tokenizer.tokenize(code);
        let scan = TokenScan::collect(stream.as_mut());

        let mut segments = Vec::with_capacity(scan.tokens.len() + 1);
        let mut cursor = 0;

        for token in &scan.tokens {
            let end = lines.offset(token.to_line, token.to_col).max(cursor);
            if end > cursor {
                segments.push(Segment {
                    color: self.colors.color_for(token.kind),
                    text: &code[cursor..end],
                    kind: Some(token.kind),
                });
            }
            cursor = end;
        }

        if let Some(err) = &scan.halted {
            tracing::debug!("Highlighting fell back to raw text: {}", err);
        }

        // Unconsumed remainder after a failure, or trailing trivia after the last token
        if cursor < code.len() {
            segments.push(Segment {
                color: self.colors.fallback(),
                text: &code[cursor..],
                kind: None,
            });
        }

        Highlighted {
            segments,
            halted: scan.halted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{ReplayTokenizer, Token};
    use proptest::prelude::*;

    fn colors() -> ColorMap {
        ColorMap::default()
    }

    #[test]
    fn test_empty_input() {
        let colors = colors();
        // A tokenizer that would fail if it were ever consulted
        let tokenizer = ReplayTokenizer::new(vec![Err(LexError::UnterminatedString {
            line: 1,
            col: 0,
        })]);
        let highlighter = Highlighter::with_tokenizer(&colors, tokenizer);
        assert_eq!(highlighter.highlight(""), "");
        assert_eq!(highlighter.segments("").halted, None);
    }

    #[test]
    fn test_scripted_call_scenario() {
        let colors = colors();
        let tokenizer = ReplayTokenizer::new(vec![
            Ok(Token::new(TokenKind::Name, (1, 0), (1, 3))),
            Ok(Token::new(TokenKind::LeftParen, (1, 3), (1, 4))),
            Ok(Token::new(TokenKind::String, (1, 4), (1, 8))),
            Ok(Token::new(TokenKind::RightParen, (1, 8), (1, 9))),
            Ok(Token::eof(1, 9)),
        ]);
        let highlighter = Highlighter::with_tokenizer(&colors, tokenizer);

        let result = highlighter.segments("log('hi')");
        let texts: Vec<_> = result.segments.iter().map(|s| s.text).collect();
        assert_eq!(texts, vec!["log", "(", "'hi'", ")"]);
        assert_eq!(result.text(), "log('hi')");

        let markup = result.to_markup();
        assert_eq!(markup.matches("</color>").count(), 4);
        assert_eq!(strip_markup(&markup), "log('hi')");
    }

    #[test]
    fn test_whitespace_folds_into_following_token() {
        let colors = colors();
        let highlighter = Highlighter::new(&colors);
        let result = highlighter.segments("let  x");
        assert_eq!(result.segments.len(), 2);
        assert_eq!(result.segments[1].text, "  x");
        assert_eq!(result.segments[1].kind, Some(TokenKind::Name));
        assert_eq!(
            result.segments[1].color,
            colors.color_for(TokenKind::Name)
        );
    }

    #[test]
    fn test_multiline_tokens_keep_line_endings() {
        let colors = colors();
        let highlighter = Highlighter::new(&colors);
        let code = "let a = 1;\r\nlet b = `x\ny`;\n";
        let result = highlighter.segments(code);
        assert!(result.is_complete());
        assert_eq!(result.text(), code);
        // Trailing newline is emitted as raw text
        assert_eq!(result.segments.last().unwrap().text, "\n");
        assert_eq!(result.segments.last().unwrap().kind, None);
    }

    #[test]
    fn test_lexical_failure_falls_back_to_raw_remainder() {
        let colors = colors();
        let highlighter = Highlighter::new(&colors);
        let code = "print(\"unterminated <b>\nnext line";
        let result = highlighter.segments(code);

        assert!(matches!(
            result.halted,
            Some(LexError::UnterminatedString { .. })
        ));
        let last = result.segments.last().unwrap();
        assert_eq!(last.text, "\"unterminated <b>\nnext line");
        assert_eq!(last.color, colors.fallback());

        let markup = result.to_markup();
        assert!(markup.ends_with(
            "<color=#AAAAAA>\"unterminated &lt;b&gt;\nnext line</color>"
        ));
        assert_eq!(strip_markup(&markup), code);
    }

    #[test]
    fn test_escaping_happens_once() {
        let colors = colors();
        let highlighter = Highlighter::new(&colors);
        let markup = highlighter.highlight("a<b>c");
        assert_eq!(markup.matches("&lt;").count(), 1);
        assert_eq!(markup.matches("&gt;").count(), 1);
        assert!(!markup.contains("&amp;"));
        assert!(!markup.contains("&amp;lt;"));
    }

    #[test]
    fn test_bad_positions_are_clamped() {
        let colors = colors();
        let tokenizer = ReplayTokenizer::new(vec![
            Ok(Token::new(TokenKind::Name, (1, 0), (1, 50))),
            Ok(Token::new(TokenKind::Name, (1, 0), (1, 1))),
            Ok(Token::new(TokenKind::Name, (9, 0), (9, 2))),
            Ok(Token::eof(9, 2)),
        ]);
        let highlighter = Highlighter::with_tokenizer(&colors, tokenizer);
        let result = highlighter.segments("ab\ncd");
        assert_eq!(result.text(), "ab\ncd");
    }

    #[test]
    fn test_unicode_columns() {
        let colors = colors();
        let highlighter = Highlighter::new(&colors);
        let code = "let é = \"ü\"; x";
        assert_eq!(highlighter.segments(code).text(), code);
    }

    #[test]
    fn test_line_index_offsets() {
        let index = LineIndex::new("ab\r\ncd\n");
        assert_eq!(index.offset(1, 0), 0);
        assert_eq!(index.offset(1, 2), 2);
        assert_eq!(index.offset(1, 3), 3);
        assert_eq!(index.offset(1, 99), 3);
        assert_eq!(index.offset(2, 1), 5);
        assert_eq!(index.offset(3, 0), 7);
        assert_eq!(index.offset(4, 0), 7);
    }

    proptest! {
        #[test]
        fn test_markup_round_trips(code in "[a-z0-9_ \\n\\r\\t\"'`(){}<>&+*/.:#@=;-]{0,80}") {
            let colors = ColorMap::default();
            let highlighter = Highlighter::new(&colors);
            let markup = highlighter.highlight(&code);

            // Property: stripping the tags reproduces the input, failure or not
            prop_assert_eq!(strip_markup(&markup), code.clone());

            // Property: each markup character is escaped exactly once
            prop_assert_eq!(markup.matches("&amp;").count(), code.matches('&').count());
            prop_assert_eq!(markup.matches("&lt;").count(), code.matches('<').count());
            prop_assert_eq!(markup.matches("&gt;").count(), code.matches('>').count());
        }

        #[test]
        fn test_segments_are_contiguous(code in "[a-z ()\\n\"]{0,40}") {
            let colors = ColorMap::default();
            let highlighter = Highlighter::new(&colors);
            let result = highlighter.segments(&code);

            // Property: no empty segments, and they reassemble the input
            prop_assert!(result.segments.iter().all(|s| !s.text.is_empty()));
            prop_assert_eq!(result.text(), code);
        }
    }
}
