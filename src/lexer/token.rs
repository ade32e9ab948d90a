//! Token types produced by the console tokenizer

use serde::{Deserialize, Serialize};

/// Kind of a lexed token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    // Keywords
    Let,
    Const,
    If,
    Else,
    Switch,
    Do,
    While,
    Until,
    Loop,
    For,
    In,
    Break,
    Continue,
    Return,
    Throw,
    Try,
    Catch,
    Fn,
    Private,
    Import,
    Export,
    As,
    True,
    False,
    This,
    Global,

    // Operators
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    PowerOf,
    Assign,
    CompoundAssign,
    EqualsTo,
    NotEqualsTo,
    LessThan,
    LessThanEqualsTo,
    GreaterThan,
    GreaterThanEqualsTo,
    And,
    Or,
    Bang,
    Ampersand,
    Pipe,
    XOr,
    LeftShift,
    RightShift,
    ExclusiveRange,
    InclusiveRange,
    DoubleQuestion,
    Elvis,
    QuestionBracket,
    DoubleArrow,
    Arrow,

    // Punctuation
    Period,
    Colon,
    DoubleColon,
    Comma,
    SemiColon,
    Question,

    // Brackets
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    MapStart,

    // Literals
    String,
    LongString,
    Char,
    Number,
    NumberHex,

    Comment,
    Name,
    Eof,
    Invalid,
}

/// Broad grouping of token kinds, used by color themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenCategory {
    Keyword,
    Operator,
    Punctuation,
    Bracket,
    String,
    Number,
    Comment,
    Name,
    Eof,
    Invalid,
}

impl TokenKind {
    /// Every token kind, in declaration order
    pub const ALL: &'static [TokenKind] = &[
        Self::Let,
        Self::Const,
        Self::If,
        Self::Else,
        Self::Switch,
        Self::Do,
        Self::While,
        Self::Until,
        Self::Loop,
        Self::For,
        Self::In,
        Self::Break,
        Self::Continue,
        Self::Return,
        Self::Throw,
        Self::Try,
        Self::Catch,
        Self::Fn,
        Self::Private,
        Self::Import,
        Self::Export,
        Self::As,
        Self::True,
        Self::False,
        Self::This,
        Self::Global,
        Self::Plus,
        Self::Minus,
        Self::Multiply,
        Self::Divide,
        Self::Modulo,
        Self::PowerOf,
        Self::Assign,
        Self::CompoundAssign,
        Self::EqualsTo,
        Self::NotEqualsTo,
        Self::LessThan,
        Self::LessThanEqualsTo,
        Self::GreaterThan,
        Self::GreaterThanEqualsTo,
        Self::And,
        Self::Or,
        Self::Bang,
        Self::Ampersand,
        Self::Pipe,
        Self::XOr,
        Self::LeftShift,
        Self::RightShift,
        Self::ExclusiveRange,
        Self::InclusiveRange,
        Self::DoubleQuestion,
        Self::Elvis,
        Self::QuestionBracket,
        Self::DoubleArrow,
        Self::Arrow,
        Self::Period,
        Self::Colon,
        Self::DoubleColon,
        Self::Comma,
        Self::SemiColon,
        Self::Question,
        Self::LeftParen,
        Self::RightParen,
        Self::LeftBracket,
        Self::RightBracket,
        Self::LeftBrace,
        Self::RightBrace,
        Self::MapStart,
        Self::String,
        Self::LongString,
        Self::Char,
        Self::Number,
        Self::NumberHex,
        Self::Comment,
        Self::Name,
        Self::Eof,
        Self::Invalid,
    ];

    /// Look up the keyword kind for an identifier, if it is reserved
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "let" => Self::Let,
            "const" => Self::Const,
            "if" => Self::If,
            "else" => Self::Else,
            "switch" => Self::Switch,
            "do" => Self::Do,
            "while" => Self::While,
            "until" => Self::Until,
            "loop" => Self::Loop,
            "for" => Self::For,
            "in" => Self::In,
            "break" => Self::Break,
            "continue" => Self::Continue,
            "return" => Self::Return,
            "throw" => Self::Throw,
            "try" => Self::Try,
            "catch" => Self::Catch,
            "fn" => Self::Fn,
            "private" => Self::Private,
            "import" => Self::Import,
            "export" => Self::Export,
            "as" => Self::As,
            "true" => Self::True,
            "false" => Self::False,
            "this" => Self::This,
            "global" => Self::Global,
            _ => return None,
        };
        Some(kind)
    }

    pub fn category(&self) -> TokenCategory {
        use TokenKind::*;
        match self {
            Let | Const | If | Else | Switch | Do | While | Until | Loop | For | In | Break
            | Continue | Return | Throw | Try | Catch | Fn | Private | Import | Export | As
            | True | False | This | Global => TokenCategory::Keyword,

            Plus | Minus | Multiply | Divide | Modulo | PowerOf | Assign | CompoundAssign
            | EqualsTo | NotEqualsTo | LessThan | LessThanEqualsTo | GreaterThan
            | GreaterThanEqualsTo | And | Or | Bang | Ampersand | Pipe | XOr | LeftShift
            | RightShift | ExclusiveRange | InclusiveRange | DoubleQuestion | Elvis
            | QuestionBracket | DoubleArrow | Arrow => TokenCategory::Operator,

            Period | Colon | DoubleColon | Comma | SemiColon | Question => {
                TokenCategory::Punctuation
            }

            LeftParen | RightParen | LeftBracket | RightBracket | LeftBrace | RightBrace
            | MapStart => TokenCategory::Bracket,

            String | LongString | Char => TokenCategory::String,
            Number | NumberHex => TokenCategory::Number,
            Comment => TokenCategory::Comment,
            Name => TokenCategory::Name,
            Eof => TokenCategory::Eof,
            Invalid => TokenCategory::Invalid,
        }
    }

    pub fn is_keyword(&self) -> bool {
        self.category() == TokenCategory::Keyword
    }
}

/// A classified, position-tagged unit of source text
///
/// Lines are 1-based. Columns are 0-based character offsets within the line and
/// `to_col` is exclusive, so a token covers `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub from_line: usize,
    pub from_col: usize,
    pub to_line: usize,
    pub to_col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, from: (usize, usize), to: (usize, usize)) -> Self {
        Self {
            kind,
            from_line: from.0,
            from_col: from.1,
            to_line: to.0,
            to_col: to.1,
        }
    }

    /// A zero-width end-of-input marker at the given position
    pub fn eof(line: usize, col: usize) -> Self {
        Self::new(TokenKind::Eof, (line, col), (line, col))
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// End position as a `(line, col)` pair
    pub fn end(&self) -> (usize, usize) {
        (self.to_line, self.to_col)
    }
}
