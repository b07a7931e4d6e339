//! Declaration tree and type-expression nodes produced by the parser.
//!
//! Everything here is immutable after construction and freely shareable;
//! the whole tree derives `Serialize` so collaborators (the CLI, the debug
//! trace) can emit it as JSON.

use crate::scope::AccessControl;
use crate::token::ConstValue;
use serde::Serialize;

/// A parsed C++ type expression.
///
/// The const/volatile/mutable flags always describe the outermost node built
/// at one grammar level; pointer and reference wrappers carry their own
/// trailing-const independently of their base (`char const * const`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeNode {
    pub kind: TypeKind,
    pub is_const: bool,
    pub is_volatile: bool,
    pub is_mutable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeKind {
    /// A plain (possibly qualified) type name: `int`, `std::string`.
    Literal { name: String },
    Pointer { base: Box<TypeNode> },
    Reference { base: Box<TypeNode> },
    RvalueReference { base: Box<TypeNode> },
    Template {
        name: String,
        arguments: Vec<TypeNode>,
    },
    /// A function (pointer) type: return type plus argument list.
    Function {
        returns: Box<TypeNode>,
        arguments: Vec<Argument>,
    },
}

impl TypeNode {
    fn with_kind(kind: TypeKind) -> Self {
        Self {
            kind,
            is_const: false,
            is_volatile: false,
            is_mutable: false,
        }
    }

    pub fn literal(name: String) -> Self {
        Self::with_kind(TypeKind::Literal { name })
    }

    pub fn pointer(base: TypeNode) -> Self {
        Self::with_kind(TypeKind::Pointer { base: Box::new(base) })
    }

    pub fn reference(base: TypeNode) -> Self {
        Self::with_kind(TypeKind::Reference { base: Box::new(base) })
    }

    pub fn rvalue_reference(base: TypeNode) -> Self {
        Self::with_kind(TypeKind::RvalueReference { base: Box::new(base) })
    }

    pub fn template(name: String, arguments: Vec<TypeNode>) -> Self {
        Self::with_kind(TypeKind::Template { name, arguments })
    }

    pub fn function(returns: TypeNode, arguments: Vec<Argument>) -> Self {
        Self::with_kind(TypeKind::Function {
            returns: Box::new(returns),
            arguments,
        })
    }
}

/// A function or function-pointer argument. Unnamed parameters are legal,
/// in which case `name` is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Argument {
    pub name: String,
    pub ty: TypeNode,
    pub default: Option<DefaultValue>,
}

/// A default argument value.
///
/// A default that is a single literal constant keeps its parsed token value;
/// any other expression is preserved as concatenated raw token text. Both
/// representations are deliberate — consumers must handle either.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DefaultValue {
    Const(ConstValue),
    Expression(String),
}

/// Method/property specifier keywords, each accepted at most once and in
/// any order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Specifiers {
    pub is_virtual: bool,
    pub is_inline: bool,
    pub is_constexpr: bool,
    pub is_static: bool,
    /// Only meaningful for properties.
    pub is_mutable: bool,
}

/// A structural declaration extracted from the header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Declaration {
    Namespace(NamespaceDecl),
    Class(ClassDecl),
    Enum(EnumDecl),
    Function(FunctionDecl),
    Property(PropertyDecl),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamespaceDecl {
    pub name: String,
    pub members: Vec<Declaration>,
}

/// One entry of a class base list: `public Bar` in `class Foo : public Bar`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseClass {
    /// Possibly qualified base class name.
    pub name: String,
    /// Explicit access specifier, or the class default when omitted.
    pub access: AccessControl,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDecl {
    pub name: String,
    pub is_struct: bool,
    /// `private` for `class`, `public` for `struct`.
    pub default_access: AccessControl,
    pub bases: Vec<BaseClass>,
    pub members: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enumerator {
    pub name: String,
    /// Raw value text after `=`, captured verbatim and never evaluated.
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDecl {
    pub name: String,
    /// True for `enum class`.
    pub is_scoped: bool,
    /// Base type name; only scoped enums may carry one.
    pub base: Option<String>,
    pub enumerators: Vec<Enumerator>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDecl {
    pub name: String,
    pub specifiers: Specifiers,
    pub returns: TypeNode,
    pub arguments: Vec<Argument>,
    /// Trailing `const` qualifier.
    pub is_const: bool,
    /// `= 0` pure-specifier.
    pub is_pure: bool,
    pub access: AccessControl,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDecl {
    pub name: String,
    pub ty: TypeNode,
    pub specifiers: Specifiers,
    pub access: AccessControl,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_node_constructors() {
        let inner = TypeNode::literal("int".to_string());
        let ptr = TypeNode::pointer(inner.clone());
        match &ptr.kind {
            TypeKind::Pointer { base } => assert_eq!(**base, inner),
            _ => panic!("expected pointer"),
        }
        assert!(!ptr.is_const && !ptr.is_volatile && !ptr.is_mutable);
    }

    #[test]
    fn test_tree_serializes() {
        let decl = Declaration::Property(PropertyDecl {
            name: "x".to_string(),
            ty: TypeNode::literal("int".to_string()),
            specifiers: Specifiers::default(),
            access: AccessControl::Private,
        });
        let json = serde_json::to_string(&decl).unwrap();
        assert!(json.contains("\"x\""));
        assert!(json.contains("private"));
    }
}
