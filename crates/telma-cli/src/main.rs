//! telma CLI entry point

use std::process::ExitCode;

use telma_cli::error::exit_code_from_error;

#[tokio::main]
async fn main() -> ExitCode {
    match telma_cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code_from_error(&err))
        },
    }
}
