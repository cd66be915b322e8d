//! htmlbundle CLI - Command-line utility for validating, extracting and
//! serving HTML bundle archives.

mod cli;
mod commands;
mod config;
mod error;
mod output;
mod progress;

use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    let show_progress = progress::CliProgress::should_show(cli.quiet, cli.json);

    let result = match &cli.command {
        cli::Commands::Extract(args) => {
            commands::extract::execute(args, &*formatter, show_progress)
        }
        cli::Commands::Inspect(args) => commands::inspect::execute(args, &*formatter),
        cli::Commands::Resolve(args) => commands::resolve::execute(args, &*formatter),
        cli::Commands::Cat(args) => commands::cat::execute(args),
        cli::Commands::Cleanup(args) => commands::cleanup::execute(args, &*formatter),
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            formatter.format_error(cli.command.name(), &err);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout stays clean for JSON and `cat`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
