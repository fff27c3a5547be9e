//! Webarc CLI - Command-line utility for inspecting and copying WARC and
//! ARC web archives.

mod cli;
mod commands;
mod error;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    let config = cli.archive_config();

    match &cli.command {
        cli::Commands::Detect(args) => commands::detect::execute(args, &*formatter),
        cli::Commands::List(args) => commands::list::execute(args, &config, &*formatter),
        cli::Commands::Cat(args) => commands::cat::execute(args, &config, &*formatter),
        cli::Commands::Copy(args) => commands::copy::execute(args, &config, &*formatter),
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    }
}

/// Logs go to stderr so they never mix with record payloads on stdout.
/// `RUST_LOG` overrides the level chosen by `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
