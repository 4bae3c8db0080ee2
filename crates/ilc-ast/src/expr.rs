//! Expression nodes, matching the standard JS-like set enumerated in
//! spec.md §6: `Literal`, `Identifier`, `BinaryExpression`,
//! `UnaryExpression`, `AssignmentExpression`, `UpdateExpression`,
//! `MemberExpression`, `CallExpression`, `ArrayExpression`,
//! `ObjectExpression`, `NewExpression`, `ThisExpression`,
//! `ConditionalExpression`, `LogicalExpression`, `SequenceExpression`,
//! `SpreadElement`, `TemplateLiteral`, `ChainExpression`,
//! `ClassExpression`, `YieldExpression`, `PrivateIdentifier`.

use crate::class::ClassDecl;
use crate::literal::Literal;
use crate::stmt::FunctionDecl;
use ilc_common::Span;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Expr {
    Literal {
        value: Literal,
        span: Span,
    },
    Identifier {
        name: String,
        span: Span,
    },
    /// `#private` field/method reference inside a class body.
    PrivateIdentifier {
        name: String,
        span: Span,
    },
    This {
        span: Span,
    },
    Super {
        span: Span,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
    Unary {
        op: UnaryOp,
        argument: Box<Expr>,
        span: Span,
    },
    Update {
        op: UpdateOp,
        argument: Box<Expr>,
        prefix: bool,
        span: Span,
    },
    Assignment {
        /// `"="`, `"+="`, `"-="`, ... verbatim, so the lowerer can tell a
        /// plain `=` (which can introduce a new struct field per spec.md
        /// §4.2 pass 3) from a compound assignment (which cannot).
        op: String,
        target: Box<Expr>,
        value: Box<Expr>,
        span: Span,
    },
    Member {
        object: Box<Expr>,
        /// `obj.prop` -> `Identifier`; `obj[expr]` -> arbitrary `Expr`.
        property: Box<Expr>,
        computed: bool,
        optional: bool,
        span: Span,
    },
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
        optional: bool,
        span: Span,
    },
    New {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
        span: Span,
    },
    Array {
        elements: Vec<Option<Expr>>,
        span: Span,
    },
    Object {
        properties: Vec<ObjectProp>,
        span: Span,
    },
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
        span: Span,
    },
    Sequence {
        expressions: Vec<Expr>,
        span: Span,
    },
    Spread {
        argument: Box<Expr>,
        span: Span,
    },
    TemplateLiteral {
        quasis: Vec<String>,
        expressions: Vec<Expr>,
        span: Span,
    },
    /// `a?.b.c` - optional-chain wrapper; unwrapped by the idiom lowerer
    /// into nullish-guarded member/call chains.
    Chain {
        expression: Box<Expr>,
        span: Span,
    },
    /// Anonymous/arrow function expressions. Per spec.md §9 ("Closures"),
    /// the lowerer never synthesizes a closure record for these - they
    /// surface as TODO-marked stubs wherever they appear as a callback
    /// argument to an array higher-order method.
    Function {
        function: Box<FunctionDecl>,
        is_arrow: bool,
        span: Span,
    },
    Class {
        class: Box<ClassDecl>,
        span: Span,
    },
    Yield {
        argument: Option<Box<Expr>>,
        delegate: bool,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal { span, .. }
            | Expr::Identifier { span, .. }
            | Expr::PrivateIdentifier { span, .. }
            | Expr::This { span }
            | Expr::Super { span }
            | Expr::Binary { span, .. }
            | Expr::Logical { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Update { span, .. }
            | Expr::Assignment { span, .. }
            | Expr::Member { span, .. }
            | Expr::Call { span, .. }
            | Expr::New { span, .. }
            | Expr::Array { span, .. }
            | Expr::Object { span, .. }
            | Expr::Conditional { span, .. }
            | Expr::Sequence { span, .. }
            | Expr::Spread { span, .. }
            | Expr::TemplateLiteral { span, .. }
            | Expr::Chain { span, .. }
            | Expr::Function { span, .. }
            | Expr::Class { span, .. }
            | Expr::Yield { span, .. } => *span,
        }
    }

    /// Convenience constructor used heavily by tests to build small IL
    /// ASTs without threading spans through by hand.
    pub fn ident(name: impl Into<String>) -> Expr {
        Expr::Identifier {
            name: name.into(),
            span: Span::synthetic(),
        }
    }

    pub fn number(value: f64) -> Expr {
        Expr::Literal {
            value: Literal::Number(value),
            span: Span::synthetic(),
        }
    }

    pub fn string(value: impl Into<String>) -> Expr {
        Expr::Literal {
            value: Literal::String(value.into()),
            span: Span::synthetic(),
        }
    }

    pub fn member(object: Expr, property_name: impl Into<String>) -> Expr {
        Expr::Member {
            object: Box::new(object),
            property: Box::new(Expr::ident(property_name)),
            computed: false,
            optional: false,
            span: Span::synthetic(),
        }
    }

    pub fn call(callee: Expr, arguments: Vec<Expr>) -> Expr {
        Expr::Call {
            callee: Box::new(callee),
            arguments,
            optional: false,
            span: Span::synthetic(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UShr,
    In,
    InstanceOf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOp {
    /// `||`
    Or,
    /// `&&`
    And,
    /// `??`
    NullishCoalesce,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
    BitNot,
    TypeOf,
    Void,
    Delete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ObjectProp {
    KeyValue { key: String, value: Expr },
    Spread(Expr),
}
