//! Saved recipes command implementation

use anyhow::Result;
use telma_core::Config;

use super::open_store;
use crate::output::{CardView, JsonFormatter, OutputFormat, TextFormatter};

/// Execute the saved command
pub fn execute(format: OutputFormat, config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let cards: Vec<CardView> = store
        .list_all()?
        .map(|(_, record)| CardView::new(&record.recipe, true))
        .collect();

    let rendered = match format {
        OutputFormat::Text => TextFormatter::saved(&cards),
        OutputFormat::Json => JsonFormatter::document(&cards)?,
        OutputFormat::Jsonl => JsonFormatter::lines(&cards)?,
    };
    print!("{rendered}");
    Ok(())
}
