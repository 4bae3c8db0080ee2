//! `throw` lowering (spec.md §4.4): the three-outcome failure-sentinel
//! cascade picked from the enclosing function's return type - `return
//! NULL` for a pointer-returning function, a bare `return` for `void`,
//! `return -1` otherwise.

use ilc_ast::{Expr, FunctionDecl, Literal, Program, Stmt, TypeAnnotation};
use ilc_common::{LoweringOptions, Span};
use ilc_ctype::{CExpr, CStmt, IntSuffix};

fn throwing_function(return_type: Option<&str>) -> Program {
    Program {
        body: vec![Stmt::FunctionDecl {
            function: FunctionDecl {
                name: Some("run".to_string()),
                params: vec![],
                body: vec![Stmt::Throw {
                    argument: Expr::Literal { value: Literal::String("bad input".to_string()), span: Span::synthetic() },
                    span: Span::synthetic(),
                }],
                is_async: false,
                is_generator: false,
                return_type: return_type.map(TypeAnnotation::new),
                span: Span::synthetic(),
            },
            span: Span::synthetic(),
        }],
    }
}

fn lowered_throw(return_type: Option<&str>) -> CStmt {
    let program = throwing_function(return_type);
    let (file, _) = ilc_lowering::transform(&program, LoweringOptions::default());
    file.functions[0].body[0].clone()
}

#[test]
fn throw_in_a_pointer_returning_function_returns_null() {
    match lowered_throw(Some("uint8[]")) {
        CStmt::Return { value: Some(CExpr::Null) } => {}
        other => panic!("expected `return NULL;`, got {other:?}"),
    }
}

#[test]
fn throw_in_a_void_function_returns_bare() {
    match lowered_throw(Some("void")) {
        CStmt::Return { value: None } => {}
        other => panic!("expected a bare `return;`, got {other:?}"),
    }
}

#[test]
fn throw_in_a_scalar_returning_function_returns_negative_one() {
    match lowered_throw(Some("uint32")) {
        CStmt::Return { value: Some(CExpr::Int { value: -1, suffix: IntSuffix::None }) } => {}
        other => panic!("expected `return -1;`, got {other:?}"),
    }
}
