//! Lowering configuration options.
//!
//! Mirrors the shape of a checker-options struct: a plain, `Default`-deriving
//! bag of flags consulted throughout the pass, rather than a builder. Most
//! of these fields are "reserved" in the sense spec.md describes them -
//! they are threaded onto the output `CFile` for the (out-of-scope) C
//! emitter to act on, and only `add_headers`/`add_comments` change what
//! this crate itself produces.

/// Target C standard label. Affects the downstream emitter only; carried
/// here so it can be threaded onto `CFile::standard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub enum CStandard {
    C89,
    C99,
    #[default]
    C11,
    C17,
    C23,
}

#[derive(Debug, Clone)]
pub struct LoweringOptions {
    /// Target C standard label (`standard` in spec.md's option table).
    pub standard: CStandard,
    /// Whether to auto-include `stdint.h`, `stdbool.h`, `stddef.h`,
    /// `stdlib.h`, `string.h`, `stdio.h`, `ctype.h`.
    pub add_headers: bool,
    /// Whether to include a file-level generated-code header comment.
    pub add_comments: bool,
    /// Reserved; affects the downstream emitter only.
    pub use_strict_types: bool,
    /// Reserved; affects the downstream emitter only.
    pub use_const_correctness: bool,
}

impl Default for LoweringOptions {
    fn default() -> Self {
        LoweringOptions {
            standard: CStandard::C11,
            add_headers: true,
            add_comments: true,
            use_strict_types: false,
            use_const_correctness: false,
        }
    }
}
