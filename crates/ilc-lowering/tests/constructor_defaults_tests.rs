//! spec.md §3 `constructor_defaults`: an omitted trailing `new Foo(...)`
//! argument is padded positionally from the constructor's own `= default`
//! expression, or the field's zero value when there is none.

use ilc_ast::{
    ClassDecl, ClassMember, Declarator, Expr, FunctionDecl, Param, Pattern, Program, Stmt,
    TypeAnnotation, VarDecl, VarKind,
};
use ilc_common::{LoweringOptions, Span};
use ilc_ctype::{CExpr, CStmt};

fn this_assign(field: &str, value: Expr) -> Stmt {
    Stmt::ExprStmt {
        expression: Expr::Assignment {
            op: "=".to_string(),
            target: Box::new(Expr::member(Expr::This { span: Span::synthetic() }, field)),
            value: Box::new(value),
            span: Span::synthetic(),
        },
        span: Span::synthetic(),
    }
}

fn counter_class() -> ClassDecl {
    ClassDecl {
        name: "Counter".to_string(),
        super_class: None,
        body: vec![ClassMember::Constructor {
            function: FunctionDecl {
                name: None,
                params: vec![
                    Param {
                        pattern: Pattern::Identifier("start".to_string()),
                        default: None,
                        type_annotation: Some(TypeAnnotation::new("uint32")),
                        is_rest: false,
                    },
                    Param {
                        pattern: Pattern::Identifier("step".to_string()),
                        default: Some(Expr::number(1.0)),
                        type_annotation: Some(TypeAnnotation::new("uint32")),
                        is_rest: false,
                    },
                ],
                body: vec![
                    this_assign("start", Expr::ident("start")),
                    this_assign("step", Expr::ident("step")),
                ],
                is_async: false,
                is_generator: false,
                return_type: None,
                span: Span::synthetic(),
            },
        }],
        span: Span::synthetic(),
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

fn find_var_decl<'a>(body: &'a [CStmt], name: &str) -> Option<&'a CStmt> {
    body.iter().find(|s| matches!(s, CStmt::VarDecl { name: n, .. } if n == name))
}

fn program_with_new(arguments: Vec<Expr>) -> Program {
    Program {
        body: vec![
            Stmt::ClassDecl { class: counter_class(), span: Span::synthetic() },
            Stmt::FunctionDecl {
                function: FunctionDecl {
                    name: Some("run".to_string()),
                    params: vec![],
                    body: vec![const_decl(
                        "c",
                        Expr::New {
                            callee: Box::new(Expr::ident("Counter")),
                            arguments,
                            span: Span::synthetic(),
                        },
                    )],
                    is_async: false,
                    is_generator: false,
                    return_type: None,
                    span: Span::synthetic(),
                },
                span: Span::synthetic(),
            },
        ],
    }
}

#[test]
fn omitted_trailing_argument_is_padded_from_the_constructor_default() {
    let program = program_with_new(vec![Expr::number(10.0)]);
    let (file, _) = ilc_lowering::transform(&program, LoweringOptions::default());
    let run = file.find_function("run").unwrap();
    match find_var_decl(&run.body, "c").unwrap() {
        CStmt::VarDecl { init: Some(CExpr::Call { callee, args }), .. } => {
            assert_eq!(callee, "counter_new");
            assert_eq!(args.len(), 2);
            assert_eq!(args[1], CExpr::UInt { value: 1, suffix: ilc_ctype::IntSuffix::U });
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn fully_applied_call_is_left_untouched() {
    let program = program_with_new(vec![Expr::number(10.0), Expr::number(5.0)]);
    let (file, _) = ilc_lowering::transform(&program, LoweringOptions::default());
    let run = file.find_function("run").unwrap();
    match find_var_decl(&run.body, "c").unwrap() {
        CStmt::VarDecl { init: Some(CExpr::Call { args, .. }), .. } => assert_eq!(args.len(), 2),
        other => panic!("unexpected: {other:?}"),
    }
}
