//! Recipe detail command implementation

use anyhow::{Context, Result};
use telma_core::Config;

use super::{build_client, open_store};
use crate::output::{DetailView, JsonFormatter, OutputFormat, TextFormatter};

/// Execute the show command
pub async fn execute(id: &str, format: OutputFormat, config: &Config) -> Result<()> {
    let client = build_client(config)?;
    let store = open_store(config)?;

    let detail = client
        .recipe_detail(id)
        .await
        .with_context(|| format!("Failed to load recipe '{id}'"))?;
    let view = DetailView::new(&detail, store.is_saved(id)?);

    let rendered = match format {
        OutputFormat::Text => TextFormatter::detail(&view),
        OutputFormat::Json => JsonFormatter::document(&view)?,
        OutputFormat::Jsonl => JsonFormatter::lines([&view])?,
    };
    print!("{rendered}");
    Ok(())
}
