//! Statement nodes, matching spec.md §6's statement-level closed set plus
//! declarations (`ClassDeclaration`, `FunctionDeclaration`).

use crate::class::ClassDecl;
use crate::expr::Expr;
use crate::pattern::Pattern;
use crate::ty::TypeAnnotation;
use ilc_common::Span;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Stmt {
    VarDecl(VarDecl),
    ExprStmt {
        expression: Expr,
        span: Span,
    },
    Return {
        argument: Option<Expr>,
        span: Span,
    },
    If {
        test: Expr,
        consequent: Box<Stmt>,
        alternate: Option<Box<Stmt>>,
        span: Span,
    },
    For {
        init: Option<Box<Stmt>>,
        test: Option<Expr>,
        update: Option<Expr>,
        body: Box<Stmt>,
        span: Span,
    },
    /// Both `for (const x of a)` and `for (const x in a)`; `is_for_in`
    /// distinguishes the two (spec.md §4.5: "for-in: equivalent to
    /// for-of (not meaningful in C)").
    ForOf {
        left: Pattern,
        left_kind: VarKind,
        right: Expr,
        body: Box<Stmt>,
        is_for_in: bool,
        span: Span,
    },
    While {
        test: Expr,
        body: Box<Stmt>,
        span: Span,
    },
    DoWhile {
        body: Box<Stmt>,
        test: Expr,
        span: Span,
    },
    Switch {
        discriminant: Expr,
        cases: Vec<SwitchCase>,
        span: Span,
    },
    Try {
        block: Vec<Stmt>,
        catch_param: Option<Pattern>,
        catch_body: Option<Vec<Stmt>>,
        finally_body: Option<Vec<Stmt>>,
        span: Span,
    },
    Throw {
        argument: Expr,
        span: Span,
    },
    Block {
        body: Vec<Stmt>,
        span: Span,
    },
    ClassDecl {
        class: ClassDecl,
        span: Span,
    },
    FunctionDecl {
        function: FunctionDecl,
        span: Span,
    },
    Break {
        label: Option<String>,
        span: Span,
    },
    Continue {
        label: Option<String>,
        span: Span,
    },
    Labeled {
        label: String,
        body: Box<Stmt>,
        span: Span,
    },
    /// Class `static { ... }` initialization block.
    StaticBlock {
        body: Vec<Stmt>,
        span: Span,
    },
    Empty {
        span: Span,
    },
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::VarDecl(v) => v.span,
            Stmt::ExprStmt { span, .. }
            | Stmt::Return { span, .. }
            | Stmt::If { span, .. }
            | Stmt::For { span, .. }
            | Stmt::ForOf { span, .. }
            | Stmt::While { span, .. }
            | Stmt::DoWhile { span, .. }
            | Stmt::Switch { span, .. }
            | Stmt::Try { span, .. }
            | Stmt::Throw { span, .. }
            | Stmt::Block { span, .. }
            | Stmt::ClassDecl { span, .. }
            | Stmt::FunctionDecl { span, .. }
            | Stmt::Break { span, .. }
            | Stmt::Continue { span, .. }
            | Stmt::Labeled { span, .. }
            | Stmt::StaticBlock { span, .. }
            | Stmt::Empty { span } => *span,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VarDecl {
    pub kind: VarKind,
    pub declarations: Vec<Declarator>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Declarator {
    pub id: Pattern,
    pub init: Option<Expr>,
    pub type_annotation: Option<TypeAnnotation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    /// `None` for `default:`.
    pub test: Option<Expr>,
    pub consequent: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: Option<String>,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
    pub is_async: bool,
    pub is_generator: bool,
    pub return_type: Option<TypeAnnotation>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub pattern: Pattern,
    pub default: Option<Expr>,
    pub type_annotation: Option<TypeAnnotation>,
    pub is_rest: bool,
}
