//! # telma-core
//!
//! Core functionality for telma, a terminal recipe browser backed by a remote
//! recipe search API.
//!
//! ## Architecture
//!
//! - **Query strings**: [`QueryCodec`] turns a [`FilterSet`] into the
//!   `key=value&...` form used both for command arguments and API requests,
//!   and parses it back
//! - **Saved recipes**: [`SavedRecipeStore`] keeps bookmarked recipes in a
//!   flat key-value store under `cookie-recipe<id>` keys
//! - **Pagination**: [`Paginator`] and [`RecipeFeed`] follow the API's opaque
//!   next-page links with at most one request in flight
//! - **API client**: [`RecipeClient`] issues search and lookup requests
//! - **Configuration**: [`Config`] from TOML plus `TELMA_*` overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use telma_core::{FilterSet, MemoryStore, QueryCodec, SavedRecipeStore};
//!
//! let filters = QueryCodec::decode("cuisineType=asian&q=ramen");
//! assert_eq!(filters.search_term(), Some("ramen"));
//! assert_eq!(QueryCodec::encode(&filters), "cuisineType=asian&q=ramen");
//!
//! let store = SavedRecipeStore::new(MemoryStore::new());
//! assert!(!store.is_saved("abc123")?);
//! # Ok::<(), telma_core::Error>(())
//! ```

/// Remote recipe API client
pub mod client;
/// Configuration loading and environment overrides
pub mod config;
/// Error types and result aliases
pub mod error;
/// Listing sessions over a recipe source
pub mod feed;
/// Cursor pagination state machine
pub mod pagination;
/// Query-string filters and their codec
pub mod query;
/// Saved recipes persistence
pub mod saved;
/// Recipe payload types
pub mod types;

pub use client::{ApiConfig, Endpoint, RecipeClient, validate_recipe_id};
pub use config::{ApiSettings, Config, DefaultsConfig, PathsConfig};
pub use error::{Error, Result};
pub use feed::{RecipeFeed, RecipeSource};
pub use pagination::{Completion, FeedState, LoadTicket, Paginator};
pub use query::{Facet, FilterParam, FilterSet, ParamKind, QueryCodec};
pub use saved::{
    FileStore, KeyValueStore, MemoryStore, SavedRecipeRecord, SavedRecipeStore, SavedSnapshot,
    SavedState,
};
pub use types::{
    CookTime, Hit, ImageInfo, Ingredient, Link, Links, RecipeCard, RecipeDetail, RecipeImages,
    RecipeLookup, SearchPage, Tag, TagKind, TimeUnit, recipe_id_from_uri,
};
