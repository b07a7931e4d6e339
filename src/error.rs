//! Parse error types.
//!
//! Every error is fatal: the first one encountered aborts the whole parse
//! and is propagated up the recursive descent with `?`. There is no partial
//! result or resynchronization.

use std::fmt;
use thiserror::Error;

/// Where a parse failed: line, byte offset, and the few bytes of input that
/// immediately precede the failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePos {
    pub line: usize,
    pub offset: usize,
    /// Up to [`CONTEXT_BYTES`] bytes of source text before the failure.
    pub context: String,
}

/// Length of the trailing context snippet captured in [`SourcePos`].
pub const CONTEXT_BYTES: usize = 8;

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, offset {} (after \"{}\")",
            self.line, self.offset, self.context
        )
    }
}

/// Fatal parse errors.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("unexpected token {found} at {pos}")]
    UnexpectedToken { found: String, pos: SourcePos },

    #[error("missing symbol '{expected}' at {pos}")]
    MissingSymbol { expected: String, pos: SourcePos },

    #[error("missing identifier ({context}) at {pos}")]
    MissingIdentifier { context: String, pos: SourcePos },

    #[error("scope depth exceeded at {pos}")]
    ScopeDepthExceeded { pos: SourcePos },

    #[error("scope underflow at {pos}")]
    ScopeUnderflow { pos: SourcePos },

    #[error("malformed numeric literal '{text}' at {pos}")]
    MalformedNumericLiteral { text: String, pos: SourcePos },

    #[error("unexpected end of input at {pos}")]
    UnexpectedEof { pos: SourcePos },
}

pub type Result<T> = std::result::Result<T, ParseError>;
