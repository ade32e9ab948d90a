//! Token Stream Adapter
//!
//! The highlighter does not lex source itself. It pulls tokens one at a time from a
//! [`TokenStream`] produced by a [`Tokenizer`], which lets tests drive it with scripted
//! tokens and lets the console plug in [`RhaiTokenizer`].
//!
//! A stream yields tokens in source order and then an end-of-input token
//! ([`TokenKind::Eof`]) forever. It may instead halt early with a [`LexError`]
//! (unterminated string, stray character, ...); once halted it keeps returning
//! the same error.

mod scanner;
mod token;

pub use scanner::{RhaiLexer, RhaiTokenizer};
pub use token::{Token, TokenCategory, TokenKind};

use thiserror::Error;

/// Lexical failure reported by a token stream
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated string literal starting at {line}:{col}")]
    UnterminatedString { line: usize, col: usize },

    #[error("unterminated character literal starting at {line}:{col}")]
    UnterminatedChar { line: usize, col: usize },

    #[error("unterminated block comment starting at {line}:{col}")]
    UnterminatedComment { line: usize, col: usize },

    #[error("malformed number literal at {line}:{col}")]
    MalformedNumber { line: usize, col: usize },

    #[error("unexpected character {ch:?} at {line}:{col}")]
    UnexpectedChar { ch: char, line: usize, col: usize },
}

impl LexError {
    /// Position where the failing token started
    pub fn position(&self) -> (usize, usize) {
        match *self {
            LexError::UnterminatedString { line, col }
            | LexError::UnterminatedChar { line, col }
            | LexError::UnterminatedComment { line, col }
            | LexError::MalformedNumber { line, col }
            | LexError::UnexpectedChar { line, col, .. } => (line, col),
        }
    }
}

/// A finite sequence of tokens over one source text
pub trait TokenStream {
    /// Produce the next token, [`TokenKind::Eof`] at the end, or the lexical failure
    /// that halted the stream
    fn next_token(&mut self) -> Result<Token, LexError>;
}

/// Factory for token streams; every call starts a fresh pass over the source
pub trait Tokenizer {
    fn tokenize<'a>(&self, source: &'a str) -> Box<dyn TokenStream + 'a>;
}

/// Everything a stream produced before it ended or halted
///
/// `tokens` never contains the end-of-input marker. `halted` is set when lexing
/// stopped on a failure, in which case the text after the last token is the
/// unconsumed remainder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenScan {
    pub tokens: Vec<Token>,
    pub halted: Option<LexError>,
}

impl TokenScan {
    /// Drain a stream until end-of-input or the first lexical failure
    pub fn collect(stream: &mut dyn TokenStream) -> Self {
        let mut scan = TokenScan::default();
        loop {
            match stream.next_token() {
                Ok(token) if token.is_eof() => break,
                Ok(token) => scan.tokens.push(token),
                Err(err) => {
                    scan.halted = Some(err);
                    break;
                }
            }
        }
        scan
    }

    pub fn is_complete(&self) -> bool {
        self.halted.is_none()
    }
}

/// A token stream replaying a fixed list of results
///
/// Useful for driving the highlighter with tokens from an external lexer that has
/// already run.
#[derive(Debug, Clone)]
pub struct ReplayStream {
    items: std::vec::IntoIter<Result<Token, LexError>>,
    last: Result<Token, LexError>,
}

impl ReplayStream {
    pub fn new(items: Vec<Result<Token, LexError>>) -> Self {
        Self {
            items: items.into_iter(),
            last: Ok(Token::eof(1, 0)),
        }
    }
}

impl TokenStream for ReplayStream {
    fn next_token(&mut self) -> Result<Token, LexError> {
        if let Some(item) = self.items.next() {
            self.last = item;
        }
        self.last.clone()
    }
}

/// Tokenizer handing out [`ReplayStream`]s over the same recorded tokens
#[derive(Debug, Clone, Default)]
pub struct ReplayTokenizer {
    items: Vec<Result<Token, LexError>>,
}

impl ReplayTokenizer {
    pub fn new(items: Vec<Result<Token, LexError>>) -> Self {
        Self { items }
    }
}

impl Tokenizer for ReplayTokenizer {
    fn tokenize<'a>(&self, _source: &'a str) -> Box<dyn TokenStream + 'a> {
        Box::new(ReplayStream::new(self.items.clone()))
    }
}
