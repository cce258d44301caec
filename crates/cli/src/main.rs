// noteloom CLI entry point.

use std::process::ExitCode as ProcessExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod exit_code;
mod output;
mod workspace;

use exit_code::ExitCode;

#[derive(Parser)]
#[command(name = "noteloom", about = "Line-level editing with reviewable diffs for Markdown notes")]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> ProcessExitCode {
    // Logs go to stderr so stdout stays parseable JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match commands::run(cli.command) {
        Ok(()) => ExitCode::Success.into(),
        Err(error) => ExitCode::from_error(&error).into(),
    }
}
