//! The IL AST root: a `Program` node with a `body` sequence, per spec.md
//! §6's input contract.

use crate::stmt::Stmt;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub body: Vec<Stmt>,
}
