//! Command implementations for the telma CLI
//!
//! Each command lives in its own submodule. Commands load what they need
//! from [`Config`], build a view from [`crate::output`] and print it in the
//! requested format.

mod bookmark;
mod completions;
mod home;
mod recipes;
mod saved;
mod show;

use anyhow::{Context, Result};
use telma_core::{Config, RecipeClient, SavedRecipeStore};

use crate::error::ErrorCategory;

pub use bookmark::{save, toggle, unsave};
pub use completions::generate;
pub use home::execute as show_home;
pub use recipes::execute as list_recipes;
pub use saved::execute as list_saved;
pub use show::execute as show_recipe;

/// Open the saved-recipes store in the configured data directory.
pub(crate) fn open_store(config: &Config) -> Result<SavedRecipeStore> {
    let data_dir = config.data_dir()?;
    SavedRecipeStore::open(&data_dir)
        .with_context(|| format!("Failed to open recipe book in {}", data_dir.display()))
}

/// Build the API client from `[api]` settings.
pub(crate) fn build_client(config: &Config) -> telma_core::Result<RecipeClient> {
    RecipeClient::new(config.api_config())
}

/// Inline message shown in place of cards when a request fails.
pub(crate) fn load_failed(err: &telma_core::Error) -> String {
    format!(
        "Couldn't load recipes ({})",
        ErrorCategory::from_core(err).description()
    )
}
