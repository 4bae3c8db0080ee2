//! Common types and utilities for the ilc IL-AST-to-C-AST lowering crates.
//!
//! This crate provides foundational types used across `ilc-ast`,
//! `ilc-ctype`, `ilc-lowering` and `ilc-cli`:
//! - Source spans (`Span`)
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`)
//! - Lowering configuration (`LoweringOptions`)
//! - Compiler limits and thresholds

pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

pub mod span;
pub use span::Span;

pub mod options;
pub use options::{CStandard, LoweringOptions};

pub mod limits;
