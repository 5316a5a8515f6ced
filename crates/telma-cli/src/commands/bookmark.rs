//! Bookmark commands: toggle, save and unsave

use anyhow::{Context, Result};
use telma_core::{Config, KeyValueStore, SavedRecipeRecord, SavedRecipeStore, validate_recipe_id};
use tracing::info;

use super::{build_client, open_store};
use crate::output::{BookmarkAction, BookmarkPayload, JsonFormatter, OutputFormat, TextFormatter};

/// Fetch the card fields of `id` for storing.
///
/// The client is only built here so that removing a bookmark works without
/// API credentials.
async fn fetch_record(config: &Config, id: &str) -> telma_core::Result<SavedRecipeRecord> {
    build_client(config)?.recipe_card(id).await
}

/// Flip the saved state of `id`
pub async fn toggle(id: &str, format: OutputFormat, config: &Config) -> Result<()> {
    validate_recipe_id(id)?;
    let store = open_store(config)?;
    let state = store
        .toggle(id, || fetch_record(config, id))
        .await
        .with_context(|| format!("Failed to update recipe '{id}'"))?;
    info!("{} ({id})", state.message());
    print_payload(&BookmarkPayload::new(id, state.into()), format)
}

/// Save `id` unless it is already saved
pub async fn save(id: &str, format: OutputFormat, config: &Config) -> Result<()> {
    validate_recipe_id(id)?;
    let store = open_store(config)?;
    let action = save_with(&store, id, || fetch_record(config, id))
        .await
        .with_context(|| format!("Failed to save recipe '{id}'"))?;
    print_payload(&BookmarkPayload::new(id, action), format)
}

/// Remove `id` unless it is not saved
pub fn unsave(id: &str, format: OutputFormat, config: &Config) -> Result<()> {
    validate_recipe_id(id)?;
    let store = open_store(config)?;
    let action = unsave_with(&store, id)?;
    print_payload(&BookmarkPayload::new(id, action), format)
}

async fn save_with<S, F, Fut>(
    store: &SavedRecipeStore<S>,
    id: &str,
    fetch: F,
) -> telma_core::Result<BookmarkAction>
where
    S: KeyValueStore,
    F: FnOnce() -> Fut,
    Fut: Future<Output = telma_core::Result<SavedRecipeRecord>>,
{
    if store.is_saved(id)? {
        return Ok(BookmarkAction::AlreadySaved);
    }
    let record = fetch().await?;
    store.save(id, &record)?;
    Ok(BookmarkAction::Added)
}

fn unsave_with<S: KeyValueStore>(
    store: &SavedRecipeStore<S>,
    id: &str,
) -> telma_core::Result<BookmarkAction> {
    if !store.is_saved(id)? {
        return Ok(BookmarkAction::NotSaved);
    }
    store.unsave(id)?;
    Ok(BookmarkAction::Removed)
}

fn print_payload(payload: &BookmarkPayload, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => TextFormatter::bookmark(payload),
        OutputFormat::Json => JsonFormatter::document(payload)?,
        OutputFormat::Jsonl => JsonFormatter::lines([payload])?,
    };
    print!("{rendered}");
    Ok(())
}
