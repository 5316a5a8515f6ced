//! Recipe listing command implementation

use anyhow::Result;
use telma_core::{
    Config, FilterSet, KeyValueStore, QueryCodec, RecipeCard, RecipeFeed, RecipeSource,
    SavedRecipeStore,
};
use tracing::{debug, warn};

use super::{build_client, load_failed, open_store};
use crate::cli::RecipesArgs;
use crate::output::{
    CardView, JsonFormatter, ListingPayload, NO_MORE_RECIPES, NO_RECIPE_FOUND, OutputFormat,
    TextFormatter,
};

/// Execute the recipes command
pub async fn execute(args: &RecipesArgs, config: &Config) -> Result<()> {
    let format = args.format.resolve();
    let user_filters = user_filters(args);
    let request = request_filters(&user_filters, config);
    let pages = args.pages.map_or(config.defaults.pages, usize::from).max(1);
    debug!(
        "listing {} ({} pages)",
        QueryCodec::encode(&request),
        pages
    );

    let client = build_client(config)?;
    let store = open_store(config)?;
    let listing = load_listing(RecipeFeed::new(&client), &request, pages).await;

    let payload = ListingPayload {
        query: QueryCodec::encode(&user_filters),
        filter_count: user_filters.filter_count(),
        pages_loaded: listing.pages_loaded,
        exhausted: listing.exhausted,
        recipes: card_views(&listing.cards, &store)?,
        message: listing.message,
    };

    let rendered = match format {
        OutputFormat::Text => TextFormatter::listing(&payload),
        OutputFormat::Json => JsonFormatter::document(&payload)?,
        OutputFormat::Jsonl => JsonFormatter::lines(&payload.recipes)?,
    };
    print!("{rendered}");
    Ok(())
}

/// Filters the user asked for: the query string first, then the filter bar.
fn user_filters(args: &RecipesArgs) -> FilterSet {
    let mut filters = args
        .query
        .as_deref()
        .map(QueryCodec::decode)
        .unwrap_or_default();
    filters.extend(FilterSet::from_filter_bar(
        args.search.as_deref(),
        args.filters.iter().cloned(),
    ));
    filters
}

/// Filters sent to the API; the configured meal types stand in for an
/// empty selection.
fn request_filters(user_filters: &FilterSet, config: &Config) -> FilterSet {
    if user_filters.is_empty() {
        FilterSet::from_pairs(
            config
                .defaults
                .meal_types
                .iter()
                .map(|meal| ("mealType", meal.as_str())),
        )
    } else {
        user_filters.clone()
    }
}

/// Cards with their saved state read from the store.
pub(crate) fn card_views<S: KeyValueStore>(
    cards: &[RecipeCard],
    store: &SavedRecipeStore<S>,
) -> Result<Vec<CardView>> {
    cards
        .iter()
        .map(|card| Ok(CardView::new(card, store.is_saved(card.id())?)))
        .collect()
}

#[derive(Debug, Default)]
struct Listing {
    cards: Vec<RecipeCard>,
    pages_loaded: usize,
    exhausted: bool,
    message: Option<String>,
}

/// First page plus up to `pages - 1` follow-up pages.
///
/// Request failures end the listing with an inline message instead of an
/// error.
async fn load_listing<S: RecipeSource>(
    mut feed: RecipeFeed<S>,
    filters: &FilterSet,
    pages: usize,
) -> Listing {
    let mut cards = match feed.start(filters).await {
        Ok(cards) => cards,
        Err(err) => {
            warn!("failed to load recipes: {err}");
            return Listing {
                message: Some(load_failed(&err)),
                ..Listing::default()
            };
        },
    };

    if cards.is_empty() {
        return Listing {
            pages_loaded: feed.pages_loaded(),
            exhausted: true,
            message: Some(NO_RECIPE_FOUND.to_string()),
            ..Listing::default()
        };
    }

    while feed.pages_loaded() < pages {
        match feed.load_more().await {
            Ok(Some(page)) => cards.extend(page),
            // A failed page is already logged and its cursor kept.
            Ok(None) | Err(_) => break,
        }
    }

    let exhausted = feed.is_exhausted();
    Listing {
        cards,
        pages_loaded: feed.pages_loaded(),
        exhausted,
        message: exhausted.then(|| NO_MORE_RECIPES.to_string()),
    }
}
