//! Diagnostics emitted by the lowering pass.
//!
//! Per the transformer's error-handling design, diagnostics are reserved
//! for genuinely *structural* input defects (a class with no constructor
//! where one is required, a `Program` root of the wrong shape, ...).
//! Unknown node kinds and missing sub-expressions never produce a
//! `Diagnostic` - they degrade silently to a comment marker or a fallback
//! type (see `ilc_lowering`'s idiom lowerer and type system).

use crate::span::Span;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub span: Span,
    pub message: String,
}

impl Diagnostic {
    pub fn error(span: Span, message: impl Into<String>) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            span,
            message: message.into(),
        }
    }

    pub fn warning(span: Span, message: impl Into<String>) -> Self {
        Self {
            category: DiagnosticCategory::Warning,
            span,
            message: message.into(),
        }
    }
}
