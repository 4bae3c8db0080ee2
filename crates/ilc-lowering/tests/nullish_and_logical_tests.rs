//! Scenario 4 family (spec.md §8): `||`, `??` and `&&` lowering, varying
//! by whether the left operand's inferred type is pointer-like.

use ilc_ast::{Expr, FunctionDecl, LogicalOp, Param, Pattern, Program, Stmt, TypeAnnotation};
use ilc_common::{LoweringOptions, Span};
use ilc_ctype::{CExpr, CStmt};

fn single_return_function(param_ty: &str, body_expr: Expr) -> Program {
    Program {
        body: vec![Stmt::FunctionDecl {
            function: FunctionDecl {
                name: Some("pick".to_string()),
                params: vec![Param {
                    pattern: Pattern::Identifier("a".to_string()),
                    default: None,
                    type_annotation: Some(TypeAnnotation::new(param_ty)),
                    is_rest: false,
                }],
                body: vec![Stmt::Return { argument: Some(body_expr), span: Span::synthetic() }],
                is_async: false,
                is_generator: false,
                return_type: None,
                span: Span::synthetic(),
            },
            span: Span::synthetic(),
        }],
    }
}

fn returned_value(param_ty: &str, body_expr: Expr) -> CExpr {
    let program = single_return_function(param_ty, body_expr);
    let (file, _) = ilc_lowering::transform(&program, LoweringOptions::default());
    match &file.functions[0].body[0] {
        CStmt::Return { value: Some(v) } => v.clone(),
        other => panic!("expected Return, got {other:?}"),
    }
}

fn logical(op: LogicalOp, left: Expr, right: Expr) -> Expr {
    Expr::Logical { op, left: Box::new(left), right: Box::new(right), span: Span::synthetic() }
}

#[test]
fn or_over_pointer_operand_becomes_a_nonnull_check_ternary() {
    let value = returned_value("uint8[]", logical(LogicalOp::Or, Expr::ident("a"), Expr::ident("a")));
    match value {
        CExpr::Ternary { cond, then_branch, else_branch } => {
            assert!(matches!(cond.as_ref(), CExpr::Ident { name } if name == "a"));
            assert!(matches!(then_branch.as_ref(), CExpr::Ident { name } if name == "a"));
            assert!(matches!(else_branch.as_ref(), CExpr::Ident { name } if name == "a"));
        }
        other => panic!("expected Ternary, got {other:?}"),
    }
}

#[test]
fn or_over_scalar_operand_collapses_to_the_left_operand_alone() {
    let value = returned_value("uint32", logical(LogicalOp::Or, Expr::ident("a"), Expr::number(7.0)));
    assert!(matches!(value, CExpr::Ident { name } if name == "a"));
}

#[test]
fn nullish_coalesce_over_pointer_operand_tests_explicit_non_null() {
    let value = returned_value("uint8[]", logical(LogicalOp::NullishCoalesce, Expr::ident("a"), Expr::ident("a")));
    match value {
        CExpr::Ternary { cond, .. } => {
            let CExpr::Binary { op, rhs, .. } = cond.as_ref() else {
                panic!("expected a Binary condition, got {cond:?}");
            };
            assert_eq!(op, "!=");
            assert!(matches!(rhs.as_ref(), CExpr::Null));
        }
        other => panic!("expected Ternary, got {other:?}"),
    }
}

#[test]
fn nullish_coalesce_over_scalar_operand_collapses_to_the_left_operand_alone() {
    let value = returned_value("uint32", logical(LogicalOp::NullishCoalesce, Expr::ident("a"), Expr::number(7.0)));
    assert!(matches!(value, CExpr::Ident { name } if name == "a"));
}

#[test]
fn logical_and_always_lowers_to_a_ternary_regardless_of_operand_type() {
    let value = returned_value("uint32", logical(LogicalOp::And, Expr::ident("a"), Expr::number(7.0)));
    match value {
        CExpr::Ternary { cond, then_branch, else_branch } => {
            assert!(matches!(cond.as_ref(), CExpr::Ident { name } if name == "a"));
            assert!(matches!(then_branch.as_ref(), CExpr::UInt { value: 7, .. }));
            assert!(matches!(else_branch.as_ref(), CExpr::Ident { name } if name == "a"));
        }
        other => panic!("expected Ternary, got {other:?}"),
    }
}
