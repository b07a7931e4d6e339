//! Recursive-descent parser for C++ header declarations.
//!
//! The parser owns a [`Lexer`] and pulls tokens on demand, dispatching on
//! the leading lexeme of each statement. It extracts structure only:
//! function and initializer bodies are skipped with a balanced-brace scan
//! and discarded.
//!
//! # Parser architecture
//!
//! Parsing methods are split across files using `impl Parser` blocks:
//! - This module: the `Parser` struct, helper methods, statement dispatch,
//!   preprocessor directives, and the balanced-brace skip.
//! - `declarations`: namespaces, classes, enums, members, and functions.
//! - `types`: the C++ type-expression grammar.
//!
//! # Errors
//!
//! The first structural violation aborts the whole parse; every method
//! propagates [`ParseError`] with `?` and nothing resynchronizes.
//!
//! # Debug trace
//!
//! With a logger installed at trace level (`RUST_LOG=trace` under the CLI),
//! the parser emits JSON snapshots of tokens and intermediate nodes.

mod declarations;
mod types;

use crate::ast::Declaration;
use crate::error::{ParseError, Result};
use crate::lexer::Lexer;
use crate::scope::{AccessControl, ScopeError, ScopeKind, ScopeStack};
use crate::token::{Token, TokenKind};
use log::trace;
use serde::Serialize;

/// Recursive-descent parser over one header source buffer.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    scopes: ScopeStack,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_starting_line(input, 1)
    }

    /// Line numbers in tokens and errors start at `starting_line`, so that
    /// positions stay meaningful when parsing a slice of a concatenation.
    pub fn with_starting_line(input: &'a [u8], starting_line: usize) -> Self {
        Self {
            lexer: Lexer::with_starting_line(input, starting_line),
            scopes: ScopeStack::new(),
        }
    }

    /// Parse every statement in the input and return the declaration tree.
    pub fn parse_all(&mut self) -> Result<Vec<Declaration>> {
        let mut declarations = Vec::new();
        while let Some(token) = self.lexer.next_token(false, false)? {
            if let Some(declaration) = self.parse_declaration(token)? {
                declarations.push(declaration);
            }
        }
        Ok(declarations)
    }

    /// Dispatch one statement by its leading token. Statements that carry
    /// no structural payload (directives, access labels, skipped templates,
    /// stray semicolons, forward declarations) yield `None`.
    pub(crate) fn parse_declaration(
        &mut self,
        token: Token,
    ) -> Result<Option<Declaration>> {
        trace!("declaration token {}", snapshot(&token));

        match token.text.as_str() {
            "#" => {
                self.lexer.unget_token(&token);
                self.parse_directive()?;
                Ok(None)
            }
            "namespace" => {
                self.lexer.unget_token(&token);
                self.parse_namespace().map(Some)
            }
            ";" => Ok(None),
            "enum" => {
                self.lexer.unget_token(&token);
                self.parse_enum().map(|decl| Some(Declaration::Enum(decl)))
            }
            "class" | "struct" => {
                self.lexer.unget_token(&token);
                self.parse_class()
            }
            "template" => {
                // Template declarations are out of scope; skip them whole.
                self.skip_declaration()?;
                Ok(None)
            }
            _ => {
                if let Some(access) = access_control_keyword(&token) {
                    self.scopes.set_current_access(access);
                    self.lexer.require_symbol(":")?;
                    return Ok(None);
                }
                self.lexer.unget_token(&token);
                self.parse_member(&token)
            }
        }
    }

    /// Preprocessor directive: `#` plus a directive name. `#define` honors
    /// backslash line continuations; `#include` additionally reads (and
    /// discards) its target with angle-bracket strings enabled, covering
    /// both the quoted and `<...>` forms. Everything else skips to the end
    /// of the line.
    fn parse_directive(&mut self) -> Result<()> {
        self.lexer.require_symbol("#")?;
        let directive = self.require_identifier("compiler directive after '#'")?;
        trace!("directive {}", snapshot(&directive));

        let mut continuations = false;
        match directive.text.as_str() {
            "define" => continuations = true,
            "include" => {
                if let Some(target) = self.lexer.next_token(true, false)? {
                    trace!("include target {}", snapshot(&target));
                }
            }
            _ => {}
        }

        self.lexer.skip_rest_of_line(continuations);
        Ok(())
    }

    /// Balanced-brace skip: discard tokens until a `;` at nesting depth
    /// zero, or the `}` that returns the depth to zero. Used for template
    /// declarations, function bodies, and unclassifiable members.
    pub(crate) fn skip_declaration(&mut self) -> Result<()> {
        let mut depth = 0i32;
        while let Some(token) = self.lexer.next_token(false, false)? {
            match token.text.as_str() {
                ";" if depth == 0 => break,
                "{" => depth += 1,
                "}" => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    // ===== Helper methods =====

    pub(crate) fn require_identifier(&mut self, context: &str) -> Result<Token> {
        match self.lexer.next_identifier()? {
            Some(token) => Ok(token),
            None => Err(ParseError::MissingIdentifier {
                context: context.to_string(),
                pos: self.lexer.pos(),
            }),
        }
    }

    pub(crate) fn require_token(&mut self) -> Result<Token> {
        match self.lexer.next_token(false, false)? {
            Some(token) => Ok(token),
            None => Err(ParseError::UnexpectedEof {
                pos: self.lexer.pos(),
            }),
        }
    }

    pub(crate) fn unexpected(&self, token: &Token) -> ParseError {
        ParseError::UnexpectedToken {
            found: token.to_string(),
            pos: self.lexer.pos(),
        }
    }

    pub(crate) fn push_scope(
        &mut self,
        name: String,
        kind: ScopeKind,
        access: AccessControl,
    ) -> Result<()> {
        self.scopes
            .push(name, kind, access)
            .map_err(|e| self.scope_error(e))
    }

    pub(crate) fn pop_scope(&mut self) -> Result<()> {
        self.scopes.pop().map_err(|e| self.scope_error(e))
    }

    fn scope_error(&self, error: ScopeError) -> ParseError {
        let pos = self.lexer.pos();
        match error {
            ScopeError::DepthExceeded => ParseError::ScopeDepthExceeded { pos },
            ScopeError::Underflow => ParseError::ScopeUnderflow { pos },
        }
    }

    pub(crate) fn current_access(&self) -> AccessControl {
        self.scopes.current_access()
    }
}

/// `public`/`protected`/`private` as a leading statement keyword.
fn access_control_keyword(token: &Token) -> Option<AccessControl> {
    if token.kind != TokenKind::Identifier {
        return None;
    }
    match token.text.as_str() {
        "public" => Some(AccessControl::Public),
        "protected" => Some(AccessControl::Protected),
        "private" => Some(AccessControl::Private),
        _ => None,
    }
}

/// JSON snapshot of a token or node for the debug trace.
pub(crate) fn snapshot<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "<unserializable>".to_string())
}
