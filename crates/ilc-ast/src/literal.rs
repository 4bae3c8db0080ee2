//! Literal values, by JS-value kind (spec.md §4.1: "Literals produce
//! integer/float/bool/string types by JS-value kind").

use serde::{Deserialize, Serialize};

// Adjacently tagged (not internally tagged): several variants wrap a bare
// primitive (`f64`, `String`, `bool`) rather than a struct/map, which
// internal tagging cannot represent - serde's internally-tagged
// serializer requires flattening the variant's payload into the same map
// as the tag, and a bare scalar has nothing to flatten into.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum Literal {
    Number(f64),
    /// Decimal digits with an optional leading `-`, as produced upstream;
    /// kept as a string since a JS BigInt can exceed `i64`/`u64` range
    /// (spec.md §9: "Values that would overflow 64 bits are out of
    /// scope" - the overflow check happens in the type system, not here).
    BigInt(String),
    String(String),
    Boolean(bool),
    Null,
    Undefined,
    RegExp { pattern: String, flags: String },
}
