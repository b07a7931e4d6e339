//! # Introduction
//!
//! cppdecl extracts structural declarations from C++ header source text:
//! namespaces, classes and structs with base lists and access control,
//! enums, member functions, and properties, along with parsed type
//! signatures. It is not a compiler front end; expressions are never
//! evaluated, symbols are never resolved, and function bodies are skipped
//! and discarded.
//!
//! ## Parsing pipeline
//!
//! ```text
//! Header bytes → Lexer → Parser → Declaration tree → JSON
//! ```
//!
//! 1. [`lexer`] — pull-based tokenizer with comment accumulation, one-step
//!    character rewind, and position-based token rewind.
//! 2. [`parser`] — recursive-descent grammar for statements, namespaces,
//!    classes, enums, members, and type expressions.
//! 3. [`scope`] — the scope stack tracking nesting and current access
//!    control.
//! 4. [`ast`] — the declaration tree and type nodes; everything derives
//!    `Serialize` for JSON output and debug tracing.
//!
//! ## Supported C++ subset
//!
//! Declarations: namespaces, `class`/`struct` with base lists, plain and
//! scoped enums, member functions (with specifiers, const and pure
//! qualifiers, default arguments), properties.
//! Types: qualified names, cv-qualifiers, pointers, references, rvalue
//! references, templates, function pointers.
//! Preprocessor directives are recognized and skipped.

pub mod ast;
pub mod chars;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod scope;
pub mod token;
