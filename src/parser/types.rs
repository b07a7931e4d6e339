//! The C++ type-expression grammar.
//!
//! Grammar, left to right: cv-qualifier keywords (each at most once), a
//! possibly-qualified name, an optional postfix `const`, an optional
//! template argument list, pointer/reference/rvalue-reference suffixes
//! (each with its own trailing `const`), and an optional function-pointer
//! form that wraps everything parsed so far as a return type.

use super::{snapshot, Parser};
use crate::ast::TypeNode;
use crate::error::Result;
use log::trace;

impl<'a> Parser<'a> {
    pub(crate) fn parse_type_node(&mut self) -> Result<TypeNode> {
        let mut is_const = false;
        let mut is_volatile = false;
        let mut is_mutable = false;
        loop {
            if !is_const && self.lexer.match_identifier("const")? {
                is_const = true;
            } else if !is_volatile && self.lexer.match_identifier("volatile")? {
                is_volatile = true;
            } else if !is_mutable && self.lexer.match_identifier("mutable")? {
                is_mutable = true;
            } else {
                break;
            }
        }

        let name = self.parse_qualified_name()?;

        // `char const` style postfix qualifier.
        if self.lexer.match_identifier("const")? {
            is_const = true;
        }

        let mut node = if self.lexer.match_symbol("<")? {
            let mut arguments = Vec::new();
            loop {
                arguments.push(self.parse_type_node()?);
                if !self.lexer.match_symbol(",")? {
                    break;
                }
            }
            // Matching a lone `>` splits a `>>` so nested argument lists
            // can share it.
            self.lexer.require_symbol(">")?;
            TypeNode::template(name, arguments)
        } else {
            TypeNode::literal(name)
        };
        node.is_const = is_const;

        // Pointer and reference suffixes, innermost first. A second `&`
        // directly after the first makes an rvalue reference.
        loop {
            if self.lexer.match_symbol("*")? {
                node = TypeNode::pointer(node);
            } else if self.lexer.match_symbol("&")? {
                node = if self.lexer.match_symbol("&")? {
                    TypeNode::rvalue_reference(node)
                } else {
                    TypeNode::reference(node)
                };
            } else {
                break;
            }
            if self.lexer.match_identifier("const")? {
                node.is_const = true;
            }
        }

        // Function pointer: `(` `*` [name] `)` `(` args `)` wraps the type
        // parsed so far as the return type. A bare `(` goes straight to the
        // argument list (`void(int)` style).
        if self.lexer.match_symbol("(")? {
            if self.lexer.match_symbol("*")? {
                if let Some(pointer_name) = self.lexer.next_identifier()? {
                    trace!("function pointer name {}", snapshot(&pointer_name));
                }
                self.lexer.require_symbol(")")?;
                self.lexer.require_symbol("(")?;
            }
            let arguments = self.parse_argument_list()?;
            node = TypeNode::function(node, arguments);
        }

        // These always describe the outermost node.
        node.is_volatile = is_volatile;
        node.is_mutable = is_mutable;

        trace!("type node {}", snapshot(&node));
        Ok(node)
    }

    /// A possibly-qualified type name: optional `class`/`struct`/`typename`
    /// noise keyword, optional leading `::`, then `::`-separated identifier
    /// segments.
    pub(crate) fn parse_qualified_name(&mut self) -> Result<String> {
        self.lexer.match_identifier("class")?;
        self.lexer.match_identifier("struct")?;
        self.lexer.match_identifier("typename")?;

        let mut name = String::new();
        let mut first = true;
        loop {
            if self.lexer.match_symbol("::")? {
                name.push_str("::");
            } else if !first {
                break;
            }
            first = false;
            let segment = self.require_identifier("type name")?;
            name.push_str(&segment.text);
        }
        Ok(name)
    }
}
