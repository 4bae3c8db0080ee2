//! C expression and statement nodes: the lowered output of
//! `IdiomLowerer`/`StatementLowerer`. These are a *generation* target, not
//! a general C parser's AST - only the shapes this crate's lowering rules
//! actually produce are represented.

use crate::types::Type;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum IntSuffix {
    None,
    U,
    L,
    UL,
    ULL,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum CExpr {
    Int {
        value: i64,
        suffix: IntSuffix,
    },
    UInt {
        value: u64,
        suffix: IntSuffix,
    },
    Float {
        value: f64,
    },
    Str {
        value: String,
    },
    Char {
        value: char,
    },
    Bool {
        value: bool,
    },
    Null,
    Ident {
        name: String,
    },
    Cast {
        to: Type,
        expr: Box<CExpr>,
    },
    Binary {
        op: String,
        lhs: Box<CExpr>,
        rhs: Box<CExpr>,
    },
    Unary {
        op: String,
        expr: Box<CExpr>,
        prefix: bool,
    },
    Assign {
        op: String,
        target: Box<CExpr>,
        value: Box<CExpr>,
    },
    Ternary {
        cond: Box<CExpr>,
        then_branch: Box<CExpr>,
        else_branch: Box<CExpr>,
    },
    Call {
        callee: String,
        args: Vec<CExpr>,
    },
    /// `object.field` when `arrow` is false, `object->field` when true.
    Member {
        object: Box<CExpr>,
        field: String,
        arrow: bool,
    },
    Index {
        object: Box<CExpr>,
        index: Box<CExpr>,
    },
    AddrOf {
        expr: Box<CExpr>,
    },
    Deref {
        expr: Box<CExpr>,
    },
    Sizeof {
        ty: Type,
    },
    /// C99 compound literal `(T[]){ ... }`.
    CompoundLiteral {
        ty: Type,
        elements: Vec<CExpr>,
    },
    Paren {
        expr: Box<CExpr>,
    },
    /// A comment placeholder in expression position, e.g. `true /* TODO:
    /// some(...) */` for an inline-closure callback (spec.md §4.4).
    CommentedValue {
        value: Box<CExpr>,
        comment: String,
    },
    /// A bare comment standing in for an expression that could not be
    /// lowered (spec.md §7: "Missing required sub-expressions produce
    /// comment placeholders").
    Missing {
        comment: String,
    },
}

impl CExpr {
    pub fn uint(value: u64) -> CExpr {
        CExpr::UInt {
            value,
            suffix: IntSuffix::U,
        }
    }

    pub fn int(value: i64) -> CExpr {
        CExpr::Int {
            value,
            suffix: IntSuffix::None,
        }
    }

    pub fn ident(name: impl Into<String>) -> CExpr {
        CExpr::Ident { name: name.into() }
    }

    pub fn call(callee: impl Into<String>, args: Vec<CExpr>) -> CExpr {
        CExpr::Call {
            callee: callee.into(),
            args,
        }
    }

    pub fn member(object: CExpr, field: impl Into<String>, arrow: bool) -> CExpr {
        CExpr::Member {
            object: Box::new(object),
            field: field.into(),
            arrow,
        }
    }

    pub fn binary(op: impl Into<String>, lhs: CExpr, rhs: CExpr) -> CExpr {
        CExpr::Binary {
            op: op.into(),
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn cast(to: Type, expr: CExpr) -> CExpr {
        CExpr::Cast {
            to,
            expr: Box::new(expr),
        }
    }

    pub fn missing(comment: impl Into<String>) -> CExpr {
        CExpr::Missing {
            comment: comment.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CSwitchCase {
    /// `None` for `default:`.
    pub test: Option<CExpr>,
    pub body: Vec<CStmt>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind")]
pub enum CStmt {
    Expr {
        expr: CExpr,
    },
    VarDecl {
        ty: Type,
        name: String,
        init: Option<CExpr>,
    },
    Return {
        value: Option<CExpr>,
    },
    If {
        cond: CExpr,
        then_branch: Vec<CStmt>,
        else_branch: Option<Vec<CStmt>>,
    },
    For {
        init: Option<Box<CStmt>>,
        cond: Option<CExpr>,
        step: Option<CExpr>,
        body: Vec<CStmt>,
    },
    While {
        cond: CExpr,
        body: Vec<CStmt>,
    },
    DoWhile {
        body: Vec<CStmt>,
        cond: CExpr,
    },
    Switch {
        discriminant: CExpr,
        cases: Vec<CSwitchCase>,
    },
    Block {
        body: Vec<CStmt>,
    },
    Break,
    Continue,
    Label {
        name: String,
    },
    Goto {
        name: String,
    },
    /// A standalone comment, e.g. `/* unknown node kind: JSXElement */`
    /// for a statement the lowerer could not handle (spec.md §7).
    Comment {
        text: String,
    },
}

impl CStmt {
    pub fn expr(expr: CExpr) -> CStmt {
        CStmt::Expr { expr }
    }

    pub fn var_decl(ty: Type, name: impl Into<String>, init: Option<CExpr>) -> CStmt {
        CStmt::VarDecl {
            ty,
            name: name.into(),
            init,
        }
    }

    pub fn comment(text: impl Into<String>) -> CStmt {
        CStmt::Comment { text: text.into() }
    }
}
