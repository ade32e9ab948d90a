//! Rhai tokenizer for highlighting
//!
//! This is a highlighting lexer, not the Rhai compiler's: it classifies source text
//! into [`TokenKind`]s and tracks positions, but it accepts some input the compiler
//! rejects (multi-character `'...'` literals, numbers glued to identifiers) because
//! partially typed code should still colour sensibly.

use super::{LexError, Token, TokenKind, TokenStream, Tokenizer};

/// Operators and punctuation, longest spelling first so that matching is greedy
const SYMBOLS: &[(&str, TokenKind)] = &[
    ("..=", TokenKind::InclusiveRange),
    ("**=", TokenKind::CompoundAssign),
    ("<<=", TokenKind::CompoundAssign),
    (">>=", TokenKind::CompoundAssign),
    ("==", TokenKind::EqualsTo),
    ("!=", TokenKind::NotEqualsTo),
    ("<=", TokenKind::LessThanEqualsTo),
    (">=", TokenKind::GreaterThanEqualsTo),
    ("&&", TokenKind::And),
    ("||", TokenKind::Or),
    ("<<", TokenKind::LeftShift),
    (">>", TokenKind::RightShift),
    ("..", TokenKind::ExclusiveRange),
    ("??", TokenKind::DoubleQuestion),
    ("?.", TokenKind::Elvis),
    ("?[", TokenKind::QuestionBracket),
    ("=>", TokenKind::DoubleArrow),
    ("->", TokenKind::Arrow),
    ("::", TokenKind::DoubleColon),
    ("+=", TokenKind::CompoundAssign),
    ("-=", TokenKind::CompoundAssign),
    ("*=", TokenKind::CompoundAssign),
    ("/=", TokenKind::CompoundAssign),
    ("%=", TokenKind::CompoundAssign),
    ("&=", TokenKind::CompoundAssign),
    ("|=", TokenKind::CompoundAssign),
    ("^=", TokenKind::CompoundAssign),
    ("**", TokenKind::PowerOf),
    ("#{", TokenKind::MapStart),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Multiply),
    ("/", TokenKind::Divide),
    ("%", TokenKind::Modulo),
    ("=", TokenKind::Assign),
    ("<", TokenKind::LessThan),
    (">", TokenKind::GreaterThan),
    ("!", TokenKind::Bang),
    ("&", TokenKind::Ampersand),
    ("|", TokenKind::Pipe),
    ("^", TokenKind::XOr),
    (".", TokenKind::Period),
    (":", TokenKind::Colon),
    (",", TokenKind::Comma),
    (";", TokenKind::SemiColon),
    ("?", TokenKind::Question),
    ("(", TokenKind::LeftParen),
    (")", TokenKind::RightParen),
    ("[", TokenKind::LeftBracket),
    ("]", TokenKind::RightBracket),
    ("{", TokenKind::LeftBrace),
    ("}", TokenKind::RightBrace),
];

/// ASCII symbols Rhai reserves without giving them a meaning
const RESERVED: &[char] = &['@', '$', '~', '\\', '#'];

/// Tokenizer producing [`RhaiLexer`] streams
#[derive(Debug, Clone, Copy, Default)]
pub struct RhaiTokenizer;

impl Tokenizer for RhaiTokenizer {
    fn tokenize<'a>(&self, source: &'a str) -> Box<dyn TokenStream + 'a> {
        Box::new(RhaiLexer::new(source))
    }
}

/// Streaming lexer over one source text
#[derive(Debug, Clone)]
pub struct RhaiLexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
    halted: Option<LexError>,
}

impl RhaiLexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 0,
            halted: None,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn advance_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let mut count = 0;
        while self.peek().is_some_and(&pred) {
            self.advance();
            count += 1;
        }
        count
    }

    fn position(&self) -> (usize, usize) {
        (self.line, self.col)
    }

    fn starts_with(&self, symbol: &str) -> bool {
        symbol
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i) == Some(c))
    }

    fn lex(&mut self) -> Result<Token, LexError> {
        self.advance_while(char::is_whitespace);

        let start = self.position();
        let Some(c) = self.peek() else {
            return Ok(Token::eof(start.0, start.1));
        };

        let kind = match c {
            '/' if self.peek_at(1) == Some('/') => {
                self.advance_while(|c| c != '\n');
                TokenKind::Comment
            }
            '/' if self.peek_at(1) == Some('*') => self.block_comment(start)?,
            '#' if self.pos == 0 && self.peek_at(1) == Some('!') => {
                // Shebang line
                self.advance_while(|c| c != '\n');
                TokenKind::Comment
            }
            '"' => self.quoted('"', start)?,
            '\'' => self.quoted('\'', start)?,
            '`' => self.long_string(start)?,
            c if c.is_ascii_digit() => self.number(start)?,
            c if c.is_alphabetic() || c == '_' => {
                let word: String = {
                    let from = self.pos;
                    self.advance_while(|c| c.is_alphanumeric() || c == '_');
                    self.chars[from..self.pos].iter().collect()
                };
                TokenKind::keyword(&word).unwrap_or(TokenKind::Name)
            }
            _ => self.symbol(c, start)?,
        };

        Ok(Token::new(kind, start, self.position()))
    }

    fn block_comment(&mut self, start: (usize, usize)) -> Result<TokenKind, LexError> {
        self.advance();
        self.advance();
        let mut depth = 1usize;
        while depth > 0 {
            if self.starts_with("/*") {
                self.advance();
                self.advance();
                depth += 1;
            } else if self.starts_with("*/") {
                self.advance();
                self.advance();
                depth -= 1;
            } else if self.advance().is_none() {
                return Err(LexError::UnterminatedComment {
                    line: start.0,
                    col: start.1,
                });
            }
        }
        Ok(TokenKind::Comment)
    }

    /// `"..."` strings and `'...'` character literals; a raw newline ends neither
    fn quoted(&mut self, quote: char, start: (usize, usize)) -> Result<TokenKind, LexError> {
        let unterminated = || {
            if quote == '"' {
                LexError::UnterminatedString {
                    line: start.0,
                    col: start.1,
                }
            } else {
                LexError::UnterminatedChar {
                    line: start.0,
                    col: start.1,
                }
            }
        };

        self.advance();
        loop {
            match self.peek() {
                None | Some('\n') => return Err(unterminated()),
                Some('\\') => {
                    self.advance();
                    // Escaped character, or a line continuation
                    if self.advance().is_none() {
                        return Err(unterminated());
                    }
                }
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }

        Ok(if quote == '"' {
            TokenKind::String
        } else {
            TokenKind::Char
        })
    }

    /// Backtick strings, which may span lines
    fn long_string(&mut self, start: (usize, usize)) -> Result<TokenKind, LexError> {
        self.advance();
        loop {
            match self.advance() {
                None => {
                    return Err(LexError::UnterminatedString {
                        line: start.0,
                        col: start.1,
                    })
                }
                Some('`') => return Ok(TokenKind::LongString),
                Some(_) => {}
            }
        }
    }

    fn number(&mut self, start: (usize, usize)) -> Result<TokenKind, LexError> {
        let malformed = LexError::MalformedNumber {
            line: start.0,
            col: start.1,
        };

        if self.peek() == Some('0') {
            let radix = match self.peek_at(1) {
                Some('x' | 'X') => Some(16),
                Some('o' | 'O') => Some(8),
                Some('b' | 'B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                self.advance();
                self.advance();
                let digits = self.advance_while(|c| c == '_' || c.is_digit(radix));
                if digits == 0 {
                    return Err(malformed);
                }
                return Ok(if radix == 16 {
                    TokenKind::NumberHex
                } else {
                    TokenKind::Number
                });
            }
        }

        self.advance_while(|c| c.is_ascii_digit() || c == '_');

        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.advance_while(|c| c.is_ascii_digit() || c == '_');
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let signed = matches!(self.peek_at(1), Some('+' | '-'));
            let digit_at = if signed { 2 } else { 1 };
            if self.peek_at(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digit_at {
                    self.advance();
                }
                self.advance_while(|c| c.is_ascii_digit());
            }
        }

        Ok(TokenKind::Number)
    }

    fn symbol(&mut self, c: char, start: (usize, usize)) -> Result<TokenKind, LexError> {
        if let Some((text, kind)) = SYMBOLS.iter().find(|(text, _)| self.starts_with(text)) {
            for _ in 0..text.chars().count() {
                self.advance();
            }
            return Ok(*kind);
        }

        if RESERVED.contains(&c) {
            self.advance();
            return Ok(TokenKind::Invalid);
        }

        Err(LexError::UnexpectedChar {
            ch: c,
            line: start.0,
            col: start.1,
        })
    }
}

impl TokenStream for RhaiLexer {
    fn next_token(&mut self) -> Result<Token, LexError> {
        if let Some(err) = &self.halted {
            return Err(err.clone());
        }

        let result = self.lex();
        if let Err(err) = &result {
            tracing::trace!("Lexer halted: {}", err);
            self.halted = Some(err.clone());
        }
        result
    }
}
