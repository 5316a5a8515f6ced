//! Shared helpers for the CLI commands.
//!
//! - [`cli_args`]: clap argument groups shared by several commands
//! - [`logging`]: tracing subscriber and color setup

pub mod cli_args;
pub mod logging;

pub use logging::initialize_logging;
