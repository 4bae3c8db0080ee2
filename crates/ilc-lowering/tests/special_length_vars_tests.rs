//! spec.md §3 `split_result_vars`/`filter_result_vars`/`special_length_vars`:
//! a `.split(...)`/`.filter(...)` result has no companion length variable;
//! reading its length later must resolve through the runtime helper macro
//! instead of silently referencing an undeclared `<name>_length`.

use ilc_ast::{Declarator, Expr, FunctionDecl, Param, Pattern, Program, Stmt, TypeAnnotation, VarDecl, VarKind};
use ilc_common::{LoweringOptions, Span};
use ilc_ctype::{CExpr, CStmt};

fn str_param() -> Param {
    Param {
        pattern: Pattern::Identifier("text".to_string()),
        default: None,
        type_annotation: Some(TypeAnnotation::new("string")),
        is_rest: false,
    }
}

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

fn function_with_body(body: Vec<Stmt>) -> Program {
    Program {
        body: vec![Stmt::FunctionDecl {
            function: FunctionDecl {
                name: Some("run".to_string()),
                params: vec![str_param()],
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

fn find_call<'a>(body: &'a [CStmt], callee_name: &str) -> &'a CStmt {
    body.iter()
        .find(|s| matches!(s, CStmt::Expr { expr: CExpr::Call { callee, .. } } if callee == callee_name))
        .unwrap_or_else(|| panic!("no call to {callee_name} found"))
}

#[test]
fn split_result_length_resolves_through_the_split_length_macro_not_an_undeclared_identifier() {
    let program = function_with_body(vec![
        const_decl(
            "parts",
            Expr::call(Expr::member(Expr::ident("text"), "split"), vec![Expr::Literal {
                value: ilc_ast::Literal::String(",".to_string()),
                span: Span::synthetic(),
            }]),
        ),
        Stmt::ExprStmt {
            expression: Expr::call(Expr::ident("process"), vec![Expr::ident("parts")]),
            span: Span::synthetic(),
        },
    ]);
    let (file, _) = ilc_lowering::transform(&program, LoweringOptions::default());
    let body = &file.functions[0].body;

    // No bare `parts_length` companion is declared for a split result.
    assert!(!body
        .iter()
        .any(|s| matches!(s, CStmt::VarDecl { name, .. } if name == "parts_length")));

    match find_call(body, "process") {
        CStmt::Expr { expr: CExpr::Call { args, .. } } => {
            assert_eq!(args.len(), 2);
            match &args[1] {
                CExpr::Ident { name } => assert_eq!(name, "STRING_SPLIT_LENGTH(parts)"),
                other => panic!("expected the split-length macro, got {other:?}"),
            }
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn filter_result_length_resolves_through_the_filter_length_macro() {
    let program = function_with_body(vec![
        const_decl(
            "kept",
            Expr::call(
                Expr::member(Expr::ident("text"), "filter"),
                vec![Expr::Function {
                    function: Box::new(FunctionDecl {
                        name: None,
                        params: vec![],
                        body: vec![],
                        is_async: false,
                        is_generator: false,
                        return_type: None,
                        span: Span::synthetic(),
                    }),
                    is_arrow: true,
                    span: Span::synthetic(),
                }],
            ),
        ),
        Stmt::ExprStmt {
            expression: Expr::call(Expr::ident("process"), vec![Expr::ident("kept")]),
            span: Span::synthetic(),
        },
    ]);
    let (file, _) = ilc_lowering::transform(&program, LoweringOptions::default());
    let body = &file.functions[0].body;

    assert!(!body
        .iter()
        .any(|s| matches!(s, CStmt::VarDecl { name, .. } if name == "kept_length")));

    match find_call(body, "process") {
        CStmt::Expr { expr: CExpr::Call { args, .. } } => {
            assert_eq!(args.len(), 2);
            match &args[1] {
                CExpr::Ident { name } => assert_eq!(name, "ARRAY_FILTER_LENGTH(kept)"),
                other => panic!("expected the filter-length macro, got {other:?}"),
            }
        }
        other => panic!("unexpected: {other:?}"),
    }
}
