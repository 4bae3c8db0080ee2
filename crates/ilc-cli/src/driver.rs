//! The `ilc lower` driver: read an IL AST JSON file, run the lowering
//! pass, write the resulting C AST JSON, report diagnostics. Mirrors
//! `tsz-cli`'s `driver.rs` role as the logic layer behind the thin `main`
//! entry point, scaled down to this crate's single-pass, single-file
//! scope (spec.md §5: no incremental state, no watch mode).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use ilc_common::{Diagnostic, DiagnosticCategory, LoweringOptions};

use crate::args::LowerArgs;

/// Runs `ilc lower`. Returns `Ok(())` even when the lowering pass itself
/// raised warning/error diagnostics (spec.md §7: diagnostics are
/// additive, never fatal) - only I/O and JSON-decoding failures, which
/// are outside the lowering pass's own error model, propagate as `Err`.
pub fn run_lower(args: &LowerArgs) -> Result<()> {
    let input_text = fs::read_to_string(&args.input)
        .with_context(|| format!("reading IL AST file `{}`", args.input.display()))?;

    let program: ilc_ast::Program = serde_json::from_str(&input_text).with_context(|| {
        format!(
            "parsing `{}` as IL AST JSON (Program root with a `body` array)",
            args.input.display()
        )
    })?;

    let options = LoweringOptions {
        standard: args.standard.into(),
        add_headers: !args.no_headers,
        add_comments: !args.no_comments,
        use_strict_types: args.strict_types,
        use_const_correctness: args.const_correctness,
    };

    tracing::info!(input = %args.input.display(), "lowering IL AST");
    let (file, diagnostics) = ilc_lowering::transform(&program, options);

    report_diagnostics(&diagnostics);

    let json = if args.pretty {
        serde_json::to_string_pretty(&file)
    } else {
        serde_json::to_string(&file)
    }
    .context("serializing C AST to JSON")?;

    match &args.out {
        Some(path) => write_output(path, &json)
            .with_context(|| format!("writing C AST JSON to `{}`", path.display()))?,
        None => println!("{json}"),
    }

    let error_count = diagnostics
        .iter()
        .filter(|d| d.category == DiagnosticCategory::Error)
        .count();
    if error_count > 0 {
        anyhow::bail!(
            "lowering produced {error_count} error diagnostic(s); best-effort C AST was still written"
        );
    }

    Ok(())
}

fn write_output(path: &Path, json: &str) -> Result<()> {
    fs::write(path, json)?;
    Ok(())
}

/// Prints diagnostics to stderr, category-colored, the way `tsz-cli`'s
/// driver renders `Diagnostic`s (spec.md §3 [AMBIENT] "Error and
/// diagnostic model").
fn report_diagnostics(diagnostics: &[Diagnostic]) {
    for d in diagnostics {
        let label = match d.category {
            DiagnosticCategory::Error => "error".red().bold(),
            DiagnosticCategory::Warning => "warning".yellow().bold(),
        };
        if d.span.is_synthetic() {
            eprintln!("{label}: {}", d.message);
        } else {
            eprintln!("{label}: {} ({}..{})", d.message, d.span.start, d.span.end);
        }
    }
}
