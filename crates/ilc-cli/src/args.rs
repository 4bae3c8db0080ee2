//! CLI arguments for the `ilc` binary (spec.md §6 "Configuration options",
//! `SPEC_FULL.md` §6 "CLI contract").

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// `ilc`: the IL-AST-to-C-AST lowering pass, exposed as a thin CLI driver
/// over `ilc-lowering` - mirrors `tsz-cli`'s relationship to `tsz-checker`.
#[derive(Parser, Debug)]
#[command(name = "ilc", version, about = "Lowers an IL AST into a typed C AST")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lower an IL AST JSON file into a C AST JSON file.
    Lower(LowerArgs),
}

#[derive(Parser, Debug)]
pub struct LowerArgs {
    /// Path to the IL AST JSON file (spec.md §6 "Input contract").
    pub input: PathBuf,

    /// Target C standard label (spec.md §6 option table: `standard`).
    #[arg(long, value_enum, default_value_t = Standard::C11)]
    pub standard: Standard,

    /// Disable auto-including `stdint.h`/`stdbool.h`/`stddef.h`/...
    /// (spec.md §6 option table: `addHeaders`).
    #[arg(long = "no-headers")]
    pub no_headers: bool,

    /// Disable the file-level generated-code header comment (spec.md §6
    /// option table: `addComments`).
    #[arg(long = "no-comments")]
    pub no_comments: bool,

    /// Reserved; threaded onto the output `CFile` for the downstream
    /// emitter (spec.md §6 option table: `useStrictTypes`).
    #[arg(long = "strict-types")]
    pub strict_types: bool,

    /// Reserved; threaded onto the output `CFile` for the downstream
    /// emitter (spec.md §6 option table: `useConstCorrectness`).
    #[arg(long = "const-correctness")]
    pub const_correctness: bool,

    /// Write the C AST JSON here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Tracing verbosity for the lowering pass's `debug!`/`trace!` spans.
    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,

    /// Pretty-print the output JSON.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Standard {
    C89,
    C99,
    C11,
    C17,
    C23,
}

impl From<Standard> for ilc_common::CStandard {
    fn from(s: Standard) -> Self {
        match s {
            Standard::C89 => ilc_common::CStandard::C89,
            Standard::C99 => ilc_common::CStandard::C99,
            Standard::C11 => ilc_common::CStandard::C11,
            Standard::C17 => ilc_common::CStandard::C17,
            Standard::C23 => ilc_common::CStandard::C23,
        }
    }
}
