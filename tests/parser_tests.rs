use cppdecl::ast::{Declaration, DefaultValue, TypeKind};
use cppdecl::error::ParseError;
use cppdecl::parser::Parser;
use cppdecl::scope::AccessControl;
use cppdecl::token::ConstValue;

const SAMPLE_HEADER: &str = r#"
// Sample header exercising most of the supported grammar.

#include <vector>

namespace test
{
    class Foo : public Bar
    {
    protected:
        bool ProtectedFunction(std::vector<int> args) const;

    public:
        enum Enum
        {
            FirstValue,
            SecondValue = 3
        };

        virtual void inProgress() = 0;

    public:
        int ThisIsAProperty;
    };
}
"#;

fn parse(source: &str) -> Vec<Declaration> {
    Parser::new(source.as_bytes()).parse_all().unwrap()
}

#[test]
fn parses_sample_header_structure() {
    let declarations = parse(SAMPLE_HEADER);
    assert_eq!(declarations.len(), 1);

    let ns = match &declarations[0] {
        Declaration::Namespace(ns) => ns,
        other => panic!("expected namespace, got {:?}", other),
    };
    assert_eq!(ns.name, "test");
    assert_eq!(ns.members.len(), 1);

    let class = match &ns.members[0] {
        Declaration::Class(class) => class,
        other => panic!("expected class, got {:?}", other),
    };
    assert_eq!(class.name, "Foo");
    assert!(!class.is_struct);
    assert_eq!(class.default_access, AccessControl::Private);
    assert_eq!(class.bases.len(), 1);
    assert_eq!(class.bases[0].name, "Bar");
    assert_eq!(class.bases[0].access, AccessControl::Public);
    assert_eq!(class.members.len(), 4);

    let protected_fn = match &class.members[0] {
        Declaration::Function(f) => f,
        other => panic!("expected function, got {:?}", other),
    };
    assert_eq!(protected_fn.name, "ProtectedFunction");
    assert_eq!(protected_fn.access, AccessControl::Protected);
    assert!(protected_fn.is_const);
    assert!(!protected_fn.is_pure);
    assert!(matches!(
        &protected_fn.returns.kind,
        TypeKind::Literal { name } if name == "bool"
    ));
    assert_eq!(protected_fn.arguments.len(), 1);
    assert_eq!(protected_fn.arguments[0].name, "args");
    match &protected_fn.arguments[0].ty.kind {
        TypeKind::Template { name, arguments } => {
            assert_eq!(name, "std::vector");
            assert_eq!(arguments.len(), 1);
            assert!(matches!(
                &arguments[0].kind,
                TypeKind::Literal { name } if name == "int"
            ));
        }
        other => panic!("expected template argument type, got {:?}", other),
    }

    let enum_decl = match &class.members[1] {
        Declaration::Enum(e) => e,
        other => panic!("expected enum, got {:?}", other),
    };
    assert_eq!(enum_decl.name, "Enum");
    assert!(!enum_decl.is_scoped);
    assert_eq!(enum_decl.enumerators.len(), 2);
    assert_eq!(enum_decl.enumerators[0].name, "FirstValue");
    assert_eq!(enum_decl.enumerators[0].value, None);
    assert_eq!(enum_decl.enumerators[1].name, "SecondValue");
    assert_eq!(enum_decl.enumerators[1].value.as_deref(), Some("3"));

    let pure_fn = match &class.members[2] {
        Declaration::Function(f) => f,
        other => panic!("expected function, got {:?}", other),
    };
    assert_eq!(pure_fn.name, "inProgress");
    assert!(pure_fn.specifiers.is_virtual);
    assert!(pure_fn.is_pure);
    assert_eq!(pure_fn.access, AccessControl::Public);
    assert!(pure_fn.arguments.is_empty());

    let property = match &class.members[3] {
        Declaration::Property(p) => p,
        other => panic!("expected property, got {:?}", other),
    };
    assert_eq!(property.name, "ThisIsAProperty");
    assert_eq!(property.access, AccessControl::Public);
    assert!(matches!(
        &property.ty.kind,
        TypeKind::Literal { name } if name == "int"
    ));
}

#[test]
fn class_and_struct_member_access_defaults() {
    let class = parse("class A { int x; };");
    match &class[0] {
        Declaration::Class(c) => match &c.members[0] {
            Declaration::Property(p) => assert_eq!(p.access, AccessControl::Private),
            other => panic!("expected property, got {:?}", other),
        },
        other => panic!("expected class, got {:?}", other),
    }

    let strukt = parse("struct A { int x; };");
    match &strukt[0] {
        Declaration::Class(c) => match &c.members[0] {
            Declaration::Property(p) => assert_eq!(p.access, AccessControl::Public),
            other => panic!("expected property, got {:?}", other),
        },
        other => panic!("expected class, got {:?}", other),
    }
}

#[test]
fn scoped_enum_with_base_type() {
    let declarations = parse("enum class Color : int { Red, Green = 5, Blue };");
    let decl = match &declarations[0] {
        Declaration::Enum(e) => e,
        other => panic!("expected enum, got {:?}", other),
    };
    assert!(decl.is_scoped);
    assert_eq!(decl.base.as_deref(), Some("int"));
    let names: Vec<&str> = decl.enumerators.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Red", "Green", "Blue"]);
    assert_eq!(decl.enumerators[1].value.as_deref(), Some("5"));
}

#[test]
fn pure_specifier_only_accepts_zero() {
    assert!(Parser::new(b"class A { virtual void f() = 0; };")
        .parse_all()
        .is_ok());
    assert!(matches!(
        Parser::new(b"class A { virtual void f() = 1; };").parse_all(),
        Err(ParseError::UnexpectedToken { .. })
    ));
}

#[test]
fn default_argument_representations() {
    let declarations = parse("void configure(int retries = 3, bool strict = flags::kDefault);");
    let func = match &declarations[0] {
        Declaration::Function(f) => f,
        other => panic!("expected function, got {:?}", other),
    };
    assert_eq!(
        func.arguments[0].default,
        Some(DefaultValue::Const(ConstValue::Int64(3)))
    );
    assert_eq!(
        func.arguments[1].default,
        Some(DefaultValue::Expression("flags::kDefault".to_string()))
    );
}

#[test]
fn starting_line_is_reflected_in_errors() {
    let mut parser = Parser::with_starting_line(b"\nclass {", 100);
    match parser.parse_all() {
        Err(ParseError::MissingIdentifier { pos, .. }) => assert_eq!(pos.line, 101),
        other => panic!("expected missing identifier error, got {:?}", other),
    }
}

#[test]
fn forward_declarations_and_directives_produce_nothing() {
    let source = "#pragma once\n#include \"other.h\"\nclass Widget;\nstruct Gadget;\n";
    assert_eq!(parse(source), Vec::new());
}

#[test]
fn declaration_tree_serializes_to_json() {
    let declarations = parse(SAMPLE_HEADER);
    let json = serde_json::to_string(&declarations).unwrap();
    assert!(json.contains("\"Foo\""));
    assert!(json.contains("\"ProtectedFunction\""));
    assert!(json.contains("\"ThisIsAProperty\""));
}
