//! Span - source location tracking for IL AST nodes and diagnostics.
//!
//! A `Span` represents a range of source code by byte offsets into the
//! original JavaScript source that the IL AST was produced from. The
//! lowering pass itself never re-derives source text from a span; spans
//! are carried through purely so a downstream emitter (out of scope here)
//! can attribute generated C back to the JS source it came from.

use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` in the original source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// A span for synthetic nodes introduced by the lowering pass itself
    /// (e.g. a synthesized `_length` field with no source counterpart).
    #[inline]
    pub const fn synthetic() -> Self {
        Span {
            start: u32::MAX,
            end: u32::MAX,
        }
    }

    #[inline]
    pub const fn is_synthetic(&self) -> bool {
        self.start == u32::MAX && self.end == u32::MAX
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
