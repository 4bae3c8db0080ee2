//! CLI argument parsing for `ilc lower`, mirroring `tsz-cli`'s own
//! `args_tests.rs` style of parsing representative argument vectors with
//! `clap::Parser::try_parse_from`.

use clap::Parser;
use ilc_cli::args::{CliArgs, Command, Standard};

fn parse(argv: &[&str]) -> LowerArgsOut {
    let cli = CliArgs::try_parse_from(argv).expect("args should parse");
    let Command::Lower(args) = cli.command;
    LowerArgsOut(args)
}

struct LowerArgsOut(ilc_cli::args::LowerArgs);

#[test]
fn defaults_to_c11_with_headers_and_comments_enabled() {
    let args = parse(&["ilc", "lower", "input.json"]);
    assert_eq!(args.0.standard, Standard::C11);
    assert!(!args.0.no_headers);
    assert!(!args.0.no_comments);
    assert!(!args.0.strict_types);
    assert!(!args.0.const_correctness);
    assert!(args.0.out.is_none());
    assert_eq!(args.0.log_level, "warn");
    assert!(!args.0.pretty);
}

#[test]
fn accepts_an_explicit_standard() {
    let args = parse(&["ilc", "lower", "input.json", "--standard", "c99"]);
    assert_eq!(args.0.standard, Standard::C99);
}

#[test]
fn no_headers_and_no_comments_flags_are_independent() {
    let args = parse(&["ilc", "lower", "input.json", "--no-headers"]);
    assert!(args.0.no_headers);
    assert!(!args.0.no_comments);
}

#[test]
fn out_and_pretty_flags_parse() {
    let args = parse(&["ilc", "lower", "input.json", "--out", "output.json", "--pretty"]);
    assert_eq!(args.0.out.as_deref(), Some(std::path::Path::new("output.json")));
    assert!(args.0.pretty);
}

#[test]
fn rejects_an_unknown_standard() {
    let result = CliArgs::try_parse_from(["ilc", "lower", "input.json", "--standard", "c2x"]);
    assert!(result.is_err());
}

#[test]
fn requires_the_lower_subcommand() {
    let result = CliArgs::try_parse_from(["ilc", "input.json"]);
    assert!(result.is_err(), "there is no top-level positional input without the `lower` subcommand");
}
