//! telma CLI - browse, search and bookmark recipes from the terminal
//!
//! The binary in `main.rs` only calls [`run`] and maps its error to an exit
//! code with [`error::exit_code_from_error`].

use anyhow::Result;
use clap::Parser;
use telma_core::Config;

mod cli;
mod commands;
pub mod error;
mod output;
mod utils;

use cli::{Cli, Commands};
use utils::initialize_logging;

/// Execute the telma CLI with the current arguments and environment.
///
/// # Errors
///
/// Returns an error if configuration loading or the command fails.
pub async fn run() -> Result<()> {
    // Convert Broken pipe panics into a clean exit
    std::panic::set_hook(Box::new(|info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe") || msg.contains("broken pipe") {
            std::process::exit(0);
        }
        eprintln!("{msg}");
    }));

    let cli = Cli::parse();
    initialize_logging(&cli)?;

    if let Commands::Completions { shell } = cli.command {
        commands::generate(shell, &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;
    execute_command(cli.command, &config).await
}

async fn execute_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Home { meal_type, format } => {
            commands::show_home(meal_type, format.resolve(), config).await?;
        },
        Commands::Recipes(args) => {
            commands::list_recipes(&args, config).await?;
        },
        Commands::Show { id, format } => {
            commands::show_recipe(&id, format.resolve(), config).await?;
        },
        Commands::Toggle { id, format } => {
            commands::toggle(&id, format.resolve(), config).await?;
        },
        Commands::Save { id, format } => {
            commands::save(&id, format.resolve(), config).await?;
        },
        Commands::Unsave { id, format } => {
            commands::unsave(&id, format.resolve(), config)?;
        },
        Commands::Saved { format } => {
            commands::list_saved(format.resolve(), config)?;
        },
        Commands::Completions { shell } => {
            commands::generate(shell, &mut std::io::stdout());
        },
    }

    Ok(())
}
