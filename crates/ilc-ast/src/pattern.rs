//! Binding patterns: plain identifiers plus `ArrayPattern`/`ObjectPattern`
//! destructuring targets (spec.md §6 input contract, §4.4 "Destructuring").

use serde::{Deserialize, Serialize};

// Adjacently tagged for the same reason as `Literal`: `Identifier` and
// `Rest` wrap a bare `String`/`Box<Pattern>` rather than a struct, which
// internal tagging cannot flatten the tag into.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum Pattern {
    Identifier(String),
    /// `const [a, b, c] = arr`. Holes (elided elements, `[a, , c]`) are
    /// `None`.
    Array(Vec<Option<Pattern>>),
    /// `const { a, b } = obj`. Per spec.md §4.4, object destructuring is
    /// not expanded to field accesses - the statement lowerer instead
    /// emits a comment marker, so this variant only needs to name the
    /// bound properties for that marker to be useful.
    Object(Vec<ObjectPatternProp>),
    Rest(Box<Pattern>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectPatternProp {
    pub key: String,
    pub value: Pattern,
}
