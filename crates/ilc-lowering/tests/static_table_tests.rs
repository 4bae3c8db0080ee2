//! Scenario 5 family (spec.md §8): a 2D `Object.freeze`-wrapped static
//! class field becomes a `static const uint32_t` table with SCREAMING_SNAKE
//! naming, and indexing a use site infers the decayed row-pointer type.

use ilc_ast::{ClassDecl, ClassMember, Declarator, Expr, FunctionDecl, Param, Pattern, Program, Stmt, VarDecl, VarKind};
use ilc_common::{LoweringOptions, Span};
use ilc_ctype::CStmt;

fn number_row(values: &[f64]) -> Expr {
    Expr::Array {
        elements: values.iter().map(|v| Some(Expr::number(*v))).collect(),
        span: Span::synthetic(),
    }
}

fn aria_class() -> ClassDecl {
    ClassDecl {
        name: "Aria".to_string(),
        super_class: None,
        body: vec![ClassMember::Field {
            name: "C".to_string(),
            is_static: true,
            type_annotation: None,
            init: Some(Expr::call(
                Expr::member(Expr::ident("Object"), "freeze"),
                vec![Expr::Array {
                    elements: vec![
                        Some(number_row(&[1.0, 2.0, 3.0, 4.0])),
                        Some(number_row(&[5.0, 6.0, 7.0, 8.0])),
                    ],
                    span: Span::synthetic(),
                }],
            )),
        }],
        span: Span::synthetic(),
    }
}

fn program() -> Program {
    Program { body: vec![Stmt::ClassDecl { class: aria_class(), span: Span::synthetic() }] }
}

#[test]
fn static_field_becomes_a_screaming_snake_global_with_uint32_rows() {
    let (file, _) = ilc_lowering::transform(&program(), LoweringOptions::default());
    let global = file.globals.iter().find(|g| g.name == "ARIA_C").expect("ARIA_C global");
    assert!(global.ty.is_const);
    assert!(global.ty.is_static);
    assert!(global.ty.is_array);
    assert_eq!(global.ty.array_size, None);
    let row = global.ty.element_type.as_ref().expect("row element type");
    assert!(row.is_array);
    assert_eq!(row.array_size, Some(4));
    assert_eq!(row.element_type.as_ref().unwrap().base_name, "uint32_t");
}

#[test]
fn indexing_the_static_table_at_a_use_site_decays_to_a_row_pointer() {
    let use_site = Expr::Member {
        object: Box::new(Expr::member(Expr::ident("Aria"), "C")),
        property: Box::new(Expr::ident("i")),
        computed: true,
        span: Span::synthetic(),
    };
    let program = Program {
        body: vec![
            Stmt::ClassDecl { class: aria_class(), span: Span::synthetic() },
            Stmt::FunctionDecl {
                function: FunctionDecl {
                    name: Some("pickRow".to_string()),
                    params: vec![Param {
                        pattern: Pattern::Identifier("i".to_string()),
                        default: None,
                        type_annotation: Some(ilc_ast::TypeAnnotation::new("uint32")),
                        is_rest: false,
                    }],
                    body: vec![Stmt::VarDecl(VarDecl {
                        kind: VarKind::Const,
                        declarations: vec![Declarator {
                            id: Pattern::Identifier("row".to_string()),
                            init: Some(use_site),
                            type_annotation: None,
                        }],
                        span: Span::synthetic(),
                    })],
                    is_async: false,
                    is_generator: false,
                    return_type: None,
                    span: Span::synthetic(),
                },
                span: Span::synthetic(),
            },
        ],
    };
    let (file, diagnostics) = ilc_lowering::transform(&program, LoweringOptions::default());
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
    let f = file.find_function("pickRow").expect("pickRow function");
    match f.body.iter().find(|s| matches!(s, CStmt::VarDecl { name, .. } if name == "row")).unwrap() {
        CStmt::VarDecl { ty, .. } => {
            assert!(ty.is_pointer);
            assert_eq!(ty.base_name, "uint32_t");
        }
        other => panic!("unexpected: {other:?}"),
    }
}
