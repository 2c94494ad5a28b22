pub mod cli;
mod commands;
pub mod core;

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::core::report::{ConsoleReporter, Reporter};
use crate::core::state::AppState;

pub use crate::commands::fetch_pack;

pub fn run() -> ExitCode {
    // Exits with usage on missing or malformed arguments.
    let cli = Cli::parse();
    let verbose = cli.verbose;

    // Structured diagnostics go to stderr; progress output goes to stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(if verbose {
                "info,packfetch_lib=debug"
            } else {
                "warn"
            })
        }))
        .with_writer(std::io::stderr)
        .init();

    let stdout_is_terminal = std::io::stdout().is_terminal();
    let config = match cli.into_config(stdout_is_terminal) {
        Ok(config) => config,
        Err(e) => {
            ConsoleReporter::new(stdout_is_terminal).error(&format!("error: {e}"));
            return ExitCode::FAILURE;
        }
    };

    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            ConsoleReporter::new(stdout_is_terminal).error(&format!("error: {e}"));
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            state.reporter.error(&format!("error: cannot start runtime: {e}"));
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(fetch_pack(&state)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            state.reporter.error(&format!("error: {e}"));
            ExitCode::FAILURE
        }
    }
}
