//! Namespace, class, enum, member, and function parsing.

use super::{access_control_keyword, snapshot, Parser};
use crate::ast::{
    Argument, BaseClass, ClassDecl, Declaration, DefaultValue, EnumDecl, Enumerator,
    FunctionDecl, NamespaceDecl, PropertyDecl, Specifiers,
};
use crate::error::Result;
use crate::scope::{AccessControl, ScopeKind};
use crate::token::{Token, TokenKind};
use log::trace;

impl<'a> Parser<'a> {
    /// `namespace name { ... }`. No trailing semicolon.
    pub(crate) fn parse_namespace(&mut self) -> Result<Declaration> {
        if !self.lexer.match_identifier("namespace")? {
            let token = self.require_token()?;
            return Err(self.unexpected(&token));
        }
        let name = self.require_identifier("namespace name")?;
        self.lexer.require_symbol("{")?;

        self.push_scope(name.text.clone(), ScopeKind::Namespace, AccessControl::Public)?;

        let mut members = Vec::new();
        loop {
            if self.lexer.match_symbol("}")? {
                break;
            }
            let token = self.require_token()?;
            if let Some(member) = self.parse_declaration(token)? {
                members.push(member);
            }
        }

        self.pop_scope()?;
        trace!("namespace {} closed", name.text);

        Ok(Declaration::Namespace(NamespaceDecl {
            name: name.text,
            members,
        }))
    }

    /// `class`/`struct` declaration. A name followed directly by `;` is a
    /// forward declaration and produces nothing.
    pub(crate) fn parse_class(&mut self) -> Result<Option<Declaration>> {
        let default_access = if self.lexer.match_identifier("class")? {
            AccessControl::Private
        } else if self.lexer.match_identifier("struct")? {
            AccessControl::Public
        } else {
            let token = self.require_token()?;
            return Err(self.unexpected(&token));
        };
        let is_struct = default_access == AccessControl::Public;

        let name = self.require_identifier("class name")?;
        trace!("class begin {}", snapshot(&name));

        if self.lexer.match_symbol(";")? {
            trace!("forward declaration of {}", name.text);
            return Ok(None);
        }

        let mut bases = Vec::new();
        if self.lexer.match_symbol(":")? {
            loop {
                let mut access = default_access;
                if let Some(token) = self.lexer.next_identifier()? {
                    match access_control_keyword(&token) {
                        Some(explicit) => access = explicit,
                        None => self.lexer.unget_token(&token),
                    }
                }
                let base_name = self.parse_qualified_name()?;
                trace!("base class {} ({:?})", base_name, access);
                bases.push(BaseClass {
                    name: base_name,
                    access,
                });
                if !self.lexer.match_symbol(",")? {
                    break;
                }
            }
        }

        self.lexer.require_symbol("{")?;
        self.push_scope(name.text.clone(), ScopeKind::Class, default_access)?;

        let mut members = Vec::new();
        loop {
            if self.lexer.match_symbol("}")? {
                break;
            }
            let token = self.require_token()?;
            if let Some(member) = self.parse_declaration(token)? {
                members.push(member);
            }
        }

        self.pop_scope()?;
        self.lexer.require_symbol(";")?;
        trace!("class end {}", name.text);

        Ok(Some(Declaration::Class(ClassDecl {
            name: name.text,
            is_struct,
            default_access,
            bases,
            members,
        })))
    }

    /// `enum [class] Name [: base] { A, B = <raw text>, ... };`.
    ///
    /// Enumerator values are captured as raw token text up to the next `,`
    /// or `}` and never evaluated. A base type is accepted only on scoped
    /// enums.
    pub(crate) fn parse_enum(&mut self) -> Result<EnumDecl> {
        if !self.lexer.match_identifier("enum")? {
            let token = self.require_token()?;
            return Err(self.unexpected(&token));
        }
        let is_scoped = self.lexer.match_identifier("class")?;

        let name = self.require_identifier("enum name")?;
        trace!("enum {} scoped={}", name.text, is_scoped);

        let mut base = None;
        if is_scoped && self.lexer.match_symbol(":")? {
            let base_token = self.require_identifier("enum base type")?;
            base = Some(base_token.text);
        }

        self.lexer.require_symbol("{")?;

        let mut enumerators = Vec::new();
        while let Some(token) = self.lexer.next_identifier()? {
            let mut value = None;
            if self.lexer.match_symbol("=")? {
                let mut text = String::new();
                while let Some(next) = self.lexer.next_token(false, false)? {
                    if next.is_symbol(",") || next.is_symbol("}") {
                        self.lexer.unget_token(&next);
                        break;
                    }
                    text.push_str(&next.text);
                }
                trace!("enumerator {} = {}", token.text, text);
                value = Some(text);
            }
            enumerators.push(Enumerator {
                name: token.text,
                value,
            });
            if !self.lexer.match_symbol(",")? {
                break;
            }
        }

        self.lexer.require_symbol("}")?;
        self.lexer.require_symbol(";")?;

        Ok(EnumDecl {
            name: name.text,
            is_scoped,
            base,
            enumerators,
        })
    }

    /// A member statement that opens with neither a keyword the dispatcher
    /// recognizes nor an access label: specifiers, a type, and a name, then
    /// classified by one token of lookahead. `leading` is the statement's
    /// first token, already pushed back; it is the rewind point if the
    /// member turns out to be a function.
    pub(crate) fn parse_member(&mut self, leading: &Token) -> Result<Option<Declaration>> {
        let specifiers = self.parse_specifiers(true)?;
        let ty = self.parse_type_node()?;
        let name = self.require_identifier("property or method name")?;
        trace!("member name {}", snapshot(&name));

        let next = self.require_token()?;
        if next.is_symbol(";") {
            return Ok(Some(Declaration::Property(PropertyDecl {
                name: name.text,
                ty,
                specifiers,
                access: self.current_access(),
            })));
        }
        if next.is_symbol("(") {
            self.lexer.unget_token(leading);
            return self.parse_function().map(Some);
        }

        trace!("unclassified member, skipping");
        self.skip_declaration()?;
        Ok(None)
    }

    /// Function declaration, re-parsed from the statement start after
    /// [`parse_member`] saw the opening `(`.
    pub(crate) fn parse_function(&mut self) -> Result<Declaration> {
        let specifiers = self.parse_specifiers(false)?;
        let returns = self.parse_type_node()?;
        let name = self.require_identifier("method name")?;
        trace!("function {}", snapshot(&name));

        self.lexer.require_symbol("(")?;
        let arguments = self.parse_argument_list()?;

        let is_const = self.lexer.match_identifier("const")?;

        let mut is_pure = false;
        if self.lexer.match_symbol("=")? {
            let token = self.require_token()?;
            if token.text != "0" {
                return Err(self.unexpected(&token));
            }
            is_pure = true;
        }

        // Body or trailing semicolon, either way discarded.
        self.skip_declaration()?;

        Ok(Declaration::Function(FunctionDecl {
            name: name.text,
            specifiers,
            returns,
            arguments,
            is_const,
            is_pure,
            access: self.current_access(),
        }))
    }

    /// Comma-separated argument list. The opening `(` has already been
    /// consumed; this consumes through the matching `)`. Each argument is a
    /// type, an optional name, and an optional default value.
    pub(crate) fn parse_argument_list(&mut self) -> Result<Vec<Argument>> {
        let mut arguments = Vec::new();
        if self.lexer.match_symbol(")")? {
            return Ok(arguments);
        }
        loop {
            let ty = self.parse_type_node()?;
            let name = match self.lexer.next_identifier()? {
                Some(token) => token.text,
                None => String::new(),
            };
            let default = if self.lexer.match_symbol("=")? {
                Some(self.parse_default_value()?)
            } else {
                None
            };
            arguments.push(Argument { name, ty, default });
            if !self.lexer.match_symbol(",")? {
                break;
            }
        }
        self.lexer.require_symbol(")")?;
        Ok(arguments)
    }

    /// A single literal-constant token keeps its parsed value; any other
    /// expression is captured as concatenated raw token text up to the next
    /// `,` or `)`, which is pushed back for the argument-list loop.
    fn parse_default_value(&mut self) -> Result<DefaultValue> {
        let mut token = self.require_token()?;
        if token.kind == TokenKind::Const {
            if let Some(value) = token.value {
                trace!("default value const {}", snapshot(&value));
                return Ok(DefaultValue::Const(value));
            }
        }

        let mut text = String::new();
        loop {
            if token.is_symbol(",") || token.is_symbol(")") {
                self.lexer.unget_token(&token);
                break;
            }
            text.push_str(&token.text);
            match self.lexer.next_token(false, false)? {
                Some(next) => token = next,
                None => break,
            }
        }
        trace!("default value expression {:?}", text);
        Ok(DefaultValue::Expression(text))
    }

    /// Specifier keywords in any order, each accepted at most once.
    /// `mutable` applies only to properties, so function re-parsing passes
    /// `allow_mutable = false`.
    pub(crate) fn parse_specifiers(&mut self, allow_mutable: bool) -> Result<Specifiers> {
        let mut specifiers = Specifiers::default();
        loop {
            if !specifiers.is_virtual && self.lexer.match_identifier("virtual")? {
                specifiers.is_virtual = true;
            } else if !specifiers.is_inline && self.lexer.match_identifier("inline")? {
                specifiers.is_inline = true;
            } else if !specifiers.is_constexpr && self.lexer.match_identifier("constexpr")? {
                specifiers.is_constexpr = true;
            } else if !specifiers.is_static && self.lexer.match_identifier("static")? {
                specifiers.is_static = true;
            } else if allow_mutable
                && !specifiers.is_mutable
                && self.lexer.match_identifier("mutable")?
            {
                specifiers.is_mutable = true;
            } else {
                break;
            }
        }
        Ok(specifiers)
    }
}
