//! Lexer (tokenizer) for C++ header source.
//!
//! Converts a raw byte buffer into positioned [`Token`]s on demand. Unlike a
//! batch tokenizer this is pull-based: the parser requests one token at a
//! time because lexing is context-sensitive (`#include <...>` strings, `>>`
//! splitting while closing template argument lists) and because the parser
//! rewinds to previously recorded token positions.
//!
//! Before each token the lexer skips "leading trivia" — whitespace, control
//! characters, and comments — while accumulating comment text for consumers
//! that want to attach documentation to declarations.

use crate::chars::{is_alnum, is_alpha, is_control, is_digit, is_space, is_xdigit};
use crate::error::{ParseError, Result, SourcePos, CONTEXT_BYTES};
use crate::token::{Comment, ConstValue, Token, TokenKind};

/// Sentinel returned by `get_char`/`peek_char` at end of input. Never a
/// valid source byte for any token class.
const EOF_CHAR: u8 = 0xFF;

/// Two-character operators matched greedily ahead of their one-character
/// prefixes. `>>` is handled separately because template closers need it
/// split into two `>` tokens.
const COMPOUND_SYMBOLS: [[u8; 2]; 19] = [
    *b"<>", *b"->", *b"!=", *b"<=", *b">=", *b"++", *b"--", *b"+=", *b"-=",
    *b"*=", *b"/=", *b"^=", *b"|=", *b"&=", *b"~=", *b"%=", *b"||", *b"==",
    *b"::",
];

/// Pull-based lexical scanner over an in-memory byte buffer.
pub struct Lexer<'a> {
    input: &'a [u8],
    cursor_pos: usize,
    cursor_line: usize,
    prev_pos: usize,
    prev_line: usize,
    comment: Comment,
    last_comment: Comment,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_starting_line(input, 1)
    }

    /// A non-default starting line keeps reported lines consistent when the
    /// input is a slice of a larger (concatenated) buffer.
    pub fn with_starting_line(input: &'a [u8], starting_line: usize) -> Self {
        Self {
            input,
            cursor_pos: 0,
            cursor_line: starting_line,
            prev_pos: 0,
            prev_line: starting_line,
            comment: Comment::default(),
            last_comment: Comment::default(),
        }
    }

    // ===== Character-level cursor =====

    /// Consume one byte, or [`EOF_CHAR`] at end of input (without moving).
    pub(crate) fn get_char(&mut self) -> u8 {
        self.prev_pos = self.cursor_pos;
        self.prev_line = self.cursor_line;
        let Some(&c) = self.input.get(self.cursor_pos) else {
            return EOF_CHAR;
        };
        if c == b'\n' {
            self.cursor_line += 1;
        }
        self.cursor_pos += 1;
        c
    }

    /// Undo the most recent `get_char`. Only one level is guaranteed; a
    /// second unget without an intervening read is not supported.
    pub(crate) fn unget_char(&mut self) {
        self.cursor_pos = self.prev_pos;
        self.cursor_line = self.prev_line;
    }

    fn peek_char(&self) -> u8 {
        self.input.get(self.cursor_pos).copied().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.cursor_pos >= self.input.len()
    }

    /// Current position plus a trailing context snippet, for error reports.
    pub(crate) fn pos(&self) -> SourcePos {
        let start = self.cursor_pos.saturating_sub(CONTEXT_BYTES);
        SourcePos {
            line: self.cursor_line,
            offset: self.cursor_pos,
            context: String::from_utf8_lossy(&self.input[start..self.cursor_pos])
                .into_owned(),
        }
    }

    // ===== Trivia and comments =====

    /// Skip whitespace, control characters, and comments; return the first
    /// significant byte (consumed), or [`EOF_CHAR`] if the input ends first.
    fn get_leading_char(&mut self) -> u8 {
        if !self.comment.is_empty() {
            self.last_comment = self.comment.clone();
        }
        self.comment.text.clear();
        self.comment.start_line = self.cursor_line;
        self.comment.end_line = self.cursor_line;

        loop {
            let c = self.get_char();
            if c == EOF_CHAR {
                return EOF_CHAR;
            }
            if c == b'\n' || is_space(c) || is_control(c) {
                continue;
            }
            if c == b'/' && self.peek_char() == b'/' {
                self.read_line_comment_block();
                continue;
            }
            if c == b'/' && self.peek_char() == b'*' {
                self.read_block_comment();
                continue;
            }
            return c;
        }
    }

    /// Read one or more consecutive `//` lines into the current comment.
    ///
    /// A line indented strictly deeper than the line that opened its block
    /// entry is treated as a continuation and joined with a single space;
    /// otherwise it starts a new line in the block. The first `/` has
    /// already been consumed and the next byte is known to be `/`.
    fn read_line_comment_block(&mut self) {
        self.retain_pending_comment();
        self.comment.start_line = self.prev_line;
        let mut lines: Vec<String> = Vec::new();
        let mut block_indent = 0usize;

        loop {
            self.get_char(); // the second '/'
            let mut raw = Vec::new();
            loop {
                let c = self.get_char();
                if c == EOF_CHAR || c == b'\n' {
                    break;
                }
                raw.push(c);
            }
            self.comment.end_line = self.prev_line;

            let raw = String::from_utf8_lossy(&raw).into_owned();
            // Extra slashes (`///` doc style) are not content.
            let stripped = raw.trim_start_matches('/');
            let content = stripped.trim_start_matches(|c| c == ' ' || c == '\t');
            let indent = stripped.len() - content.len();
            let content = content.trim_end();

            if indent > block_indent && !lines.is_empty() {
                if let Some(last) = lines.last_mut() {
                    last.push(' ');
                    last.push_str(content);
                }
            } else {
                block_indent = indent;
                lines.push(content.to_string());
            }

            // The block continues only if the immediately following line is
            // another `//` comment (leading spaces and tabs allowed).
            let mut more = false;
            loop {
                let c = self.get_char();
                if c == b' ' || c == b'\t' {
                    continue;
                }
                if c == b'/' && self.peek_char() == b'/' {
                    more = true;
                } else if c != EOF_CHAR {
                    self.unget_char();
                }
                break;
            }
            if !more {
                break;
            }
        }

        self.comment.text = lines.join("\n");
    }

    /// Read a `/* ... */` comment into the current comment. Each line is
    /// trimmed of its leading space/tab run; trailing blank lines are
    /// dropped. The `/` has been consumed and the next byte is `*`.
    fn read_block_comment(&mut self) {
        self.retain_pending_comment();
        self.comment.start_line = self.prev_line;
        self.get_char(); // the '*'

        let mut lines: Vec<String> = Vec::new();
        let mut line = Vec::new();
        let mut c = self.get_char();
        while c != EOF_CHAR && !(c == b'*' && self.peek_char() == b'/') {
            if c == b'\n' {
                if !lines.is_empty() || !line.is_empty() {
                    lines.push(take_line(&mut line));
                }
            } else if !line.is_empty() || !is_space(c) {
                line.push(c);
            }
            c = self.get_char();
        }
        if c != EOF_CHAR {
            self.get_char(); // the closing '/'
        }
        if !line.is_empty() {
            lines.push(take_line(&mut line));
        }
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        self.comment.text = lines.join("\n");
        self.comment.end_line = self.prev_line;
    }

    /// A comment already accumulated during this trivia scan is about to be
    /// overwritten by a newer one; keep it as the last completed comment.
    fn retain_pending_comment(&mut self) {
        if !self.comment.is_empty() {
            self.last_comment = self.comment.clone();
            self.comment.text.clear();
        }
    }

    /// The comment block immediately preceding the most recent token, if any.
    pub fn comment(&self) -> &Comment {
        &self.comment
    }

    /// The previous non-empty comment, retained when a newer token scan
    /// cleared the current one.
    pub fn last_comment(&self) -> &Comment {
        &self.last_comment
    }

    // ===== Token scanning =====

    /// Lex the next token, or `Ok(None)` at end of input.
    ///
    /// `angle_strings` makes `<...>` lex as a string constant (for
    /// `#include <...>`). `separate_brackets` suppresses the `>>` compound
    /// so nested template argument lists can close one `>` at a time.
    pub fn next_token(
        &mut self,
        angle_strings: bool,
        separate_brackets: bool,
    ) -> Result<Option<Token>> {
        let c = self.get_leading_char();
        if c == EOF_CHAR {
            return Ok(None);
        }
        let p = self.peek_char();

        let mut token = Token {
            kind: TokenKind::None,
            text: String::new(),
            start_pos: self.prev_pos,
            start_line: self.prev_line,
            value: None,
        };

        if is_alpha(c) || c == b'_' {
            self.scan_identifier(&mut token, c);
        } else if is_digit(c) || ((c == b'-' || c == b'+') && is_digit(p)) {
            self.scan_number(&mut token, c)?;
        } else if c == b'"' || (angle_strings && c == b'<') {
            self.scan_string(&mut token, c);
        } else {
            self.scan_symbol(&mut token, c, separate_brackets);
        }
        Ok(Some(token))
    }

    fn scan_identifier(&mut self, token: &mut Token, first: u8) {
        let mut c = first;
        loop {
            token.text.push(c as char);
            c = self.get_char();
            if is_alnum(c) || c == b'_' {
                continue;
            }
            self.unget_char();
            break;
        }

        token.kind = TokenKind::Identifier;
        // No keyword table: the parser matches lexeme text. The two boolean
        // literals are the only identifiers lexed as constants.
        match token.text.as_str() {
            "true" => {
                token.kind = TokenKind::Const;
                token.value = Some(ConstValue::Bool(true));
            }
            "false" => {
                token.kind = TokenKind::Const;
                token.value = Some(ConstValue::Bool(false));
            }
            _ => {}
        }
    }

    fn scan_number(&mut self, token: &mut Token, first: u8) -> Result<()> {
        let mut is_float = false;
        let mut is_hex = false;
        let mut c = first;
        loop {
            if c == b'.' {
                is_float = true;
            }
            if c == b'x' || c == b'X' {
                is_hex = true;
            }
            token.text.push(c as char);
            c = self.get_char();
            if is_digit(c)
                || (!is_float && c == b'.')
                || (!is_hex && (c == b'x' || c == b'X'))
                || (is_hex && is_xdigit(c))
            {
                continue;
            }
            break;
        }
        // A float may carry a trailing f suffix; it is consumed but kept out
        // of the literal text.
        if !is_float || (c != b'f' && c != b'F') {
            self.unget_char();
        }

        token.kind = TokenKind::Const;
        if is_float {
            let value: f64 = token.text.parse().map_err(|_| {
                ParseError::MalformedNumericLiteral {
                    text: token.text.clone(),
                    pos: self.pos(),
                }
            })?;
            token.value = Some(ConstValue::Float64(value));
        } else {
            let value = parse_prefixed_int(&token.text).ok_or_else(|| {
                ParseError::MalformedNumericLiteral {
                    text: token.text.clone(),
                    pos: self.pos(),
                }
            })?;
            token.value = Some(ConstValue::Int64(value));
        }
        Ok(())
    }

    fn scan_string(&mut self, token: &mut Token, opening: u8) {
        let closing = if opening == b'"' { b'"' } else { b'>' };
        let mut content = Vec::new();
        let mut c = self.get_char();
        while c != closing && c != EOF_CHAR {
            if c == b'\\' {
                c = self.get_char();
                if c == EOF_CHAR {
                    break;
                }
                // Unknown escapes pass through with the backslash dropped.
                c = match c {
                    b'n' => b'\n',
                    b't' => b'\t',
                    b'r' => b'\r',
                    other => other,
                };
            }
            content.push(c);
            c = self.get_char();
        }
        if c != closing {
            // Truncated literal at end of input: tolerate, rewind the step.
            self.unget_char();
        }

        token.text = String::from_utf8_lossy(&content).into_owned();
        token.kind = TokenKind::Const;
        token.value = Some(ConstValue::Str(token.text.clone()));
    }

    fn scan_symbol(&mut self, token: &mut Token, c: u8, separate_brackets: bool) {
        token.kind = TokenKind::Symbol;
        token.text.push(c as char);
        let d = self.peek_char();
        let pair = [c, d];
        if COMPOUND_SYMBOLS.contains(&pair)
            || (pair == *b">>" && !separate_brackets)
        {
            token.text.push(d as char);
            self.get_char();
        }
    }

    // ===== Token-level helpers =====

    /// Rewind the cursor to the recorded start of `token`. Position-
    /// addressed, not a stack: any previously observed token can be
    /// replayed, however many tokens were consumed since.
    pub fn unget_token(&mut self, token: &Token) {
        self.cursor_pos = token.start_pos;
        self.cursor_line = token.start_line;
    }

    /// Lex one token and keep it only if it is an identifier; any other
    /// token is put back and `None` is returned.
    pub fn next_identifier(&mut self) -> Result<Option<Token>> {
        match self.next_token(false, false)? {
            None => Ok(None),
            Some(token) if token.kind == TokenKind::Identifier => Ok(Some(token)),
            Some(token) => {
                self.unget_token(&token);
                Ok(None)
            }
        }
    }

    /// Consume the given identifier if it is next; otherwise leave the
    /// cursor unmoved.
    pub fn match_identifier(&mut self, identifier: &str) -> Result<bool> {
        if let Some(token) = self.next_token(false, false)? {
            if token.is_identifier(identifier) {
                return Ok(true);
            }
            self.unget_token(&token);
        }
        Ok(false)
    }

    /// Consume the given symbol if it is next; otherwise leave the cursor
    /// unmoved. Matching a lone `>` lexes with separate closing brackets so
    /// that `>>` closes two nested template lists.
    pub fn match_symbol(&mut self, symbol: &str) -> Result<bool> {
        let separate_brackets = symbol == ">";
        if let Some(token) = self.next_token(false, separate_brackets)? {
            if token.is_symbol(symbol) {
                return Ok(true);
            }
            self.unget_token(&token);
        }
        Ok(false)
    }

    pub fn require_symbol(&mut self, symbol: &str) -> Result<()> {
        if self.match_symbol(symbol)? {
            Ok(())
        } else {
            Err(ParseError::MissingSymbol {
                expected: symbol.to_string(),
                pos: self.pos(),
            })
        }
    }

    /// Skip to the end of the current line. With `continuations` enabled a
    /// trailing `\` keeps skipping onto the next line (`#define` bodies).
    pub(crate) fn skip_rest_of_line(&mut self, continuations: bool) {
        let mut last = b'\n';
        loop {
            loop {
                if self.is_eof() {
                    return;
                }
                let c = self.get_char();
                if c == b'\n' {
                    break;
                }
                last = c;
            }
            if !(continuations && last == b'\\') {
                break;
            }
        }
    }
}

/// Parse a base-prefixed integer literal: `0x` hex, leading-`0` octal,
/// decimal otherwise, with an optional sign.
fn parse_prefixed_int(text: &str) -> Option<i64> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = if let Some(hex) =
        digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16).ok()?
    } else if digits.len() > 1 && digits.starts_with('0') {
        i64::from_str_radix(&digits[1..], 8).ok()?
    } else {
        digits.parse::<i64>().ok()?
    };
    Some(if negative { -magnitude } else { magnitude })
}

fn take_line(line: &mut Vec<u8>) -> String {
    let text = String::from_utf8_lossy(line).trim_end().to_string();
    line.clear();
    text
}
