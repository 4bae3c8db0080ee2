//! Scenario 6 family (spec.md §8): `for (const x of arr)` lowers to an
//! indexed `for` loop over a fresh `_idx_<n>` counter, for both array and
//! string receivers, with `for-in` sharing the same shape.

use ilc_ast::{Expr, FunctionDecl, Param, Pattern, Program, Stmt, TypeAnnotation, VarKind};
use ilc_common::{LoweringOptions, Span};
use ilc_ctype::{CExpr, CStmt};

fn for_of_function(param_name: &str, param_ty: &str, elem_var: &str) -> Program {
    Program {
        body: vec![Stmt::FunctionDecl {
            function: FunctionDecl {
                name: Some("walk".to_string()),
                params: vec![Param {
                    pattern: Pattern::Identifier(param_name.to_string()),
                    default: None,
                    type_annotation: Some(TypeAnnotation::new(param_ty)),
                    is_rest: false,
                }],
                body: vec![Stmt::ForOf {
                    left: Pattern::Identifier(elem_var.to_string()),
                    left_kind: VarKind::Const,
                    right: Expr::ident(param_name),
                    body: Box::new(Stmt::Block { body: vec![], span: Span::synthetic() }),
                    is_for_in: false,
                    span: Span::synthetic(),
                }],
                is_async: false,
                is_generator: false,
                return_type: None,
                span: Span::synthetic(),
            },
            span: Span::synthetic(),
        }],
    }
}

fn lowered_for_stmt(param_name: &str, param_ty: &str, elem_var: &str) -> CStmt {
    let program = for_of_function(param_name, param_ty, elem_var);
    let (file, _) = ilc_lowering::transform(&program, LoweringOptions::default());
    file.functions[0].body[0].clone()
}

#[test]
fn for_of_over_array_uses_a_zero_initialized_size_t_counter() {
    let stmt = lowered_for_stmt("data", "uint8[]", "b");
    match stmt {
        CStmt::For { init: Some(init), cond: Some(cond), .. } => {
            match *init {
                CStmt::VarDecl { ty, name, init: Some(CExpr::UInt { value: 0, .. }) } => {
                    assert_eq!(ty.base_name, "size_t");
                    assert_eq!(name, "_idx_0");
                }
                other => panic!("unexpected init: {other:?}"),
            }
            match cond {
                CExpr::Binary { op, rhs, .. } => {
                    assert_eq!(op, "<");
                    assert!(matches!(*rhs, CExpr::Ident { name } if name == "data_length"));
                }
                other => panic!("unexpected cond: {other:?}"),
            }
        }
        other => panic!("expected a For statement, got {other:?}"),
    }
}

#[test]
fn for_of_over_array_declares_the_element_binding_indexed_by_the_counter() {
    let stmt = lowered_for_stmt("data", "uint8[]", "b");
    let CStmt::For { body, .. } = stmt else { panic!("expected For") };
    match &body[0] {
        CStmt::VarDecl { ty, name, init: Some(CExpr::Index { object, index }) } => {
            assert_eq!(ty.base_name, "uint8_t");
            assert!(!ty.is_pointer);
            assert_eq!(name, "b");
            assert!(matches!(object.as_ref(), CExpr::Ident { name } if name == "data"));
            assert!(matches!(index.as_ref(), CExpr::Ident { name } if name == "_idx_0"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn for_of_over_a_string_yields_a_char_element_binding() {
    let stmt = lowered_for_stmt("s", "string", "ch");
    let CStmt::For { body, .. } = stmt else { panic!("expected For") };
    match &body[0] {
        CStmt::VarDecl { ty, name, .. } => {
            assert_eq!(ty.base_name, "char");
            assert!(!ty.is_pointer);
            assert_eq!(name, "ch");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn successive_for_of_loops_in_the_same_function_get_distinct_counters() {
    let program = Program {
        body: vec![Stmt::FunctionDecl {
            function: FunctionDecl {
                name: Some("walkTwice".to_string()),
                params: vec![Param {
                    pattern: Pattern::Identifier("data".to_string()),
                    default: None,
                    type_annotation: Some(TypeAnnotation::new("uint8[]")),
                    is_rest: false,
                }],
                body: vec![
                    Stmt::ForOf {
                        left: Pattern::Identifier("a".to_string()),
                        left_kind: VarKind::Const,
                        right: Expr::ident("data"),
                        body: Box::new(Stmt::Block { body: vec![], span: Span::synthetic() }),
                        is_for_in: false,
                        span: Span::synthetic(),
                    },
                    Stmt::ForOf {
                        left: Pattern::Identifier("b".to_string()),
                        left_kind: VarKind::Const,
                        right: Expr::ident("data"),
                        body: Box::new(Stmt::Block { body: vec![], span: Span::synthetic() }),
                        is_for_in: false,
                        span: Span::synthetic(),
                    },
                ],
                is_async: false,
                is_generator: false,
                return_type: None,
                span: Span::synthetic(),
            },
            span: Span::synthetic(),
        }],
    };
    let (file, _) = ilc_lowering::transform(&program, LoweringOptions::default());
    let names: Vec<String> = file.functions[0]
        .body
        .iter()
        .map(|s| match s {
            CStmt::For { init: Some(init), .. } => match init.as_ref() {
                CStmt::VarDecl { name, .. } => name.clone(),
                _ => String::new(),
            },
            _ => String::new(),
        })
        .collect();
    assert_eq!(names, vec!["_idx_0", "_idx_1"]);
}
