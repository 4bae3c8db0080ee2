//! spec.md §3 `empty_array_push_types`: an `[]`-initialized variable has no
//! element type of its own, so the element type backing its `calloc` must be
//! recovered from a forward scan of the `.push(...)` calls made against it
//! later in the same body.

use ilc_ast::{Declarator, Expr, FunctionDecl, Param, Pattern, Program, Stmt, TypeAnnotation, VarDecl, VarKind};
use ilc_common::{LoweringOptions, Span};
use ilc_ctype::CStmt;

fn const_decl(name: &str, init: Expr) -> Stmt {
    Stmt::VarDecl(VarDecl {
        kind: VarKind::Const,
        declarations: vec![Declarator {
            id: Pattern::Identifier(name.to_string()),
            init: Some(init),
            type_annotation: None,
        }],
        span: Span::synthetic(),
    })
}

fn push_call(var: &str, arg: Expr) -> Stmt {
    Stmt::ExprStmt {
        expression: Expr::call(Expr::member(Expr::ident(var), "push"), vec![arg]),
        span: Span::synthetic(),
    }
}

fn function_with_body(body: Vec<Stmt>) -> Program {
    Program {
        body: vec![Stmt::FunctionDecl {
            function: FunctionDecl {
                name: Some("run".to_string()),
                params: vec![Param {
                    pattern: Pattern::Identifier("data".to_string()),
                    default: None,
                    type_annotation: Some(TypeAnnotation::new("uint8[]")),
                    is_rest: false,
                }],
                body,
                is_async: false,
                is_generator: false,
                return_type: None,
                span: Span::synthetic(),
            },
            span: Span::synthetic(),
        }],
    }
}

fn find_var_decl<'a>(body: &'a [CStmt], name: &str) -> Option<&'a CStmt> {
    body.iter().find(|s| matches!(s, CStmt::VarDecl { name: n, .. } if n == name))
}

#[test]
fn empty_array_later_pushed_with_bytes_infers_a_byte_pointer() {
    let program = function_with_body(vec![
        const_decl("buf", Expr::Array { elements: vec![], span: Span::synthetic() }),
        push_call("buf", Expr::number(1.0)),
        push_call("buf", Expr::number(2.0)),
    ]);
    let (file, _) = ilc_lowering::transform(&program, LoweringOptions::default());
    let body = &file.functions[0].body;
    match find_var_decl(body, "buf").unwrap() {
        CStmt::VarDecl { ty, .. } => assert!(ty.is_pointer),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn empty_array_pushed_with_a_pointer_element_upgrades_to_a_pointer_of_pointers() {
    let program = function_with_body(vec![
        const_decl("groups", Expr::Array { elements: vec![], span: Span::synthetic() }),
        push_call("groups", Expr::ident("data")),
    ]);
    let (file, _) = ilc_lowering::transform(&program, LoweringOptions::default());
    let body = &file.functions[0].body;
    match find_var_decl(body, "groups").unwrap() {
        CStmt::VarDecl { ty, .. } => assert!(ty.is_pointer),
        other => panic!("unexpected: {other:?}"),
    }
}
