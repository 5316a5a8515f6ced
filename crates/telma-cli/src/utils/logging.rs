//! Logging initialization and configuration.
//!
//! This module handles setting up the tracing subscriber and color control
//! based on CLI flags and environment variables.

use anyhow::Result;
use colored::control as color_control;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::Cli;
use crate::output::OutputFormat;

/// Pick the log level for the given flags.
///
/// Machine-readable output keeps stderr to errors only unless `--verbose`
/// was passed.
pub(crate) const fn log_level(verbose: bool, quiet: bool, machine_output: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else if quiet || machine_output {
        Level::ERROR
    } else {
        Level::WARN
    }
}

/// Initialize the logging subsystem based on CLI flags.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let machine_output = cli
        .command
        .format_arg()
        .is_some_and(|arg| matches!(arg.resolve(), OutputFormat::Json | OutputFormat::Jsonl));
    let level = log_level(cli.verbose, cli.quiet, machine_output);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Color control: disable when requested, NO_COLOR is set, or when emitting machine output
    let env_no_color = std::env::var_os("NO_COLOR").is_some();
    if cli.no_color || env_no_color || machine_output {
        color_control::set_override(false);
    }
    Ok(())
}
