//! Class declarations/expressions: the source of `StructBuilder`'s
//! class-to-struct promotion (spec.md §4.2).

use crate::expr::Expr;
use crate::stmt::FunctionDecl;
use crate::ty::TypeAnnotation;
use ilc_common::Span;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    pub super_class: Option<String>,
    pub body: Vec<ClassMember>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ClassMember {
    Constructor {
        function: FunctionDecl,
    },
    Method {
        name: String,
        is_static: bool,
        method_kind: MethodKind,
        function: FunctionDecl,
    },
    Field {
        name: String,
        is_static: bool,
        init: Option<Expr>,
        type_annotation: Option<TypeAnnotation>,
    },
    StaticBlock {
        body: Vec<crate::stmt::Stmt>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MethodKind {
    Method,
    Get,
    Set,
}
