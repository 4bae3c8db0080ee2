//! `ilc`: thin CLI driver over `ilc-lowering`, mirroring `tsz-cli`'s
//! `tsz` binary (a small `main` that parses arguments, initializes
//! tracing, and delegates to `driver::run_lower`).

use clap::Parser;
use ilc_cli::{args, driver};

fn main() -> anyhow::Result<()> {
    let cli = args::CliArgs::parse();

    let args::Command::Lower(lower_args) = &cli.command;
    init_tracing(&lower_args.log_level);

    driver::run_lower(lower_args)
}

fn init_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_new(log_level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
