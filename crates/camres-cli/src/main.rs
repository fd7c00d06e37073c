// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

mod error;
mod generate;

use clap::Parser;
use error::result_to_exit_code;
use std::process::ExitCode;

/// camres - Camera resolution report, JSON manifest and hardware profile tool
#[derive(Parser)]
#[command(name = "camres")]
#[command(version)]
#[command(about = "camres - Camera resolution report, JSON manifest and hardware profile tool")]
#[command(long_about = None)]
struct Cli {
    /// Enable verbose logging (use RUST_LOG=debug for more)
    #[arg(short, long)]
    verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(flatten)]
    generate: generate::Args,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);
    log::info!("camres {}", env!("CARGO_PKG_VERSION"));

    result_to_exit_code(generate::execute(cli.generate))
}

/// Initialize env_logger based on verbosity flags
fn init_logging(verbose: bool, quiet: bool) {
    let env = env_logger::Env::default();

    let env = if quiet {
        env.default_filter_or("error")
    } else if verbose {
        env.default_filter_or("debug")
    } else {
        env.default_filter_or("info")
    };

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .init();

    log::debug!("Logging initialized");
}
