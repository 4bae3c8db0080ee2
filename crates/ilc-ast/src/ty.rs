//! JSDoc-style type annotations the upstream producer attaches when the
//! original source carried an explicit `@type`/`@param`/`@returns` tag.
//!
//! These are opaque source type names (spec.md §4.1's `map_type` input
//! domain: `uint8`..`uint64`, `byte`, `word`, `string`, `any`, ...),
//! optionally array-suffixed (`"uint8[]"`). `ilc-lowering`'s `TypeSystem`
//! owns the table that maps these strings to concrete C types; this crate
//! only carries the raw annotation through from the AST.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAnnotation {
    /// The raw JSDoc type name, e.g. `"uint32"`, `"string"`, `"uint8[]"`.
    pub name: String,
}

impl TypeAnnotation {
    pub fn new(name: impl Into<String>) -> Self {
        TypeAnnotation { name: name.into() }
    }

    /// Whether the annotation carries an array suffix (`T[]`).
    pub fn is_array(&self) -> bool {
        self.name.ends_with("[]")
    }

    /// The annotation with any trailing `[]` stripped.
    pub fn element_name(&self) -> &str {
        self.name.strip_suffix("[]").unwrap_or(&self.name)
    }
}
