//! The IL AST: the language-independent, JS-semantics intermediate tree
//! produced upstream (out of scope here) and consumed by `ilc-lowering`.
//!
//! The node set is closed and matches spec.md §6's input contract: the
//! standard JS-like statement/expression kinds, plus JSDoc-style type
//! annotations that the upstream producer attaches where the original
//! source had an explicit type. The ~120 "idiom" node kinds from spec.md
//! §4.4 (rotations, pack/unpack, array higher-order ops, ...) are *not*
//! separate AST variants - they arrive as ordinary `Expr::Call` /
//! `Expr::Member` shapes distinguished by callee name, exactly as spec.md
//! §4.1 describes ("Call expressions map by callee name family"). The
//! lowering crate's `IdiomLowerer` owns that dispatch table.

pub mod class;
pub mod expr;
pub mod literal;
pub mod pattern;
pub mod program;
pub mod stmt;
pub mod ty;

pub use class::{ClassDecl, ClassMember, MethodKind};
pub use expr::{BinaryOp, Expr, LogicalOp, ObjectProp, UnaryOp, UpdateOp};
pub use literal::Literal;
pub use pattern::Pattern;
pub use program::Program;
pub use stmt::{Declarator, FunctionDecl, Param, Stmt, SwitchCase, VarDecl, VarKind};
pub use ty::TypeAnnotation;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_round_trips_through_json() {
        let program = Program {
            body: vec![Stmt::ExprStmt {
                expression: Expr::call(Expr::ident("foo"), vec![Expr::number(1.0)]),
                span: ilc_common::Span::synthetic(),
            }],
        };
        let json = serde_json::to_string(&program).expect("serialize");
        let back: Program = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(program, back);
    }

    #[test]
    fn array_pattern_allows_holes() {
        let pattern = Pattern::Array(vec![
            Some(Pattern::Identifier("a".into())),
            None,
            Some(Pattern::Identifier("c".into())),
        ]);
        let json = serde_json::to_string(&pattern).expect("serialize");
        let back: Pattern = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(pattern, back);
    }

    #[test]
    fn type_annotation_strips_array_suffix() {
        let ty = TypeAnnotation::new("uint8[]");
        assert!(ty.is_array());
        assert_eq!(ty.element_name(), "uint8");
    }
}
