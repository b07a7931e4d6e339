//! Token and comment data produced by the lexer.

use serde::Serialize;
use std::fmt;

/// Broad classification of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    /// Not yet classified; never escapes a successful `next_token` call.
    None,
    Identifier,
    Symbol,
    /// A literal constant; the token carries a [`ConstValue`].
    Const,
}

/// Parsed value of a literal-constant token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ConstValue {
    Bool(bool),
    Int64(i64),
    Float64(f64),
    Str(String),
}

/// A positioned token.
///
/// `start_pos`/`start_line` record where the token began, which is what makes
/// position-addressed rewind ([`Lexer::unget_token`](crate::lexer::Lexer::unget_token))
/// work: any previously observed token can be replayed from its recorded
/// start. Two tokens are equal iff all fields match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// The raw lexeme (for string constants, the unescaped content).
    pub text: String,
    /// Byte offset of the first byte of the token.
    pub start_pos: usize,
    /// Line the token starts on (1-based unless a starting line was given).
    pub start_line: usize,
    /// Set exactly when `kind == Const`.
    pub value: Option<ConstValue>,
}

impl Token {
    pub fn is_identifier(&self, text: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text == text
    }

    pub fn is_symbol(&self, text: &str) -> bool {
        self.kind == TokenKind::Symbol && self.text == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::Symbol => write!(f, "'{}'", self.text),
            TokenKind::Const => write!(f, "constant '{}'", self.text),
            TokenKind::None => write!(f, "<none>"),
        }
    }
}

/// An accumulated comment block.
///
/// Consecutive `//` lines merge into one block; `/* ... */` bodies are
/// trimmed per line. The lexer keeps at most one current and one last
/// completed comment; attaching them to declarations is a consumer concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Comment {
    /// Comment content, lines joined with `\n`. Empty means "no comment".
    pub text: String,
    pub start_line: usize,
    pub end_line: usize,
}

impl Comment {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
