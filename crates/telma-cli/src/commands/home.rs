//! Home view command implementation

use anyhow::Result;
use futures::future::join_all;
use telma_core::{Config, FilterSet, QueryCodec, RecipeCard, RecipeClient};
use tracing::warn;

use super::recipes::card_views;
use super::{build_client, load_failed, open_store};
use crate::cli::MealType;
use crate::output::{
    HomePayload, JsonFormatter, NO_RECIPE_FOUND, OutputFormat, SectionPayload, TextFormatter,
};

/// Cards shown per cuisine slider.
const SLIDER_CARDS: usize = 10;

/// One home section before bookmark state is attached.
struct Section {
    title: String,
    show_more: FilterSet,
    cards: Vec<RecipeCard>,
    message: Option<String>,
}

/// Execute the home command
pub async fn execute(meal_type: MealType, format: OutputFormat, config: &Config) -> Result<()> {
    let client = build_client(config)?;
    let store = open_store(config)?;

    let tab_filters = FilterSet::from_pairs([("mealType", meal_type.as_str())]);
    let tab = fetch_section(
        &client,
        capitalize(meal_type.as_str()),
        tab_filters.clone(),
        tab_filters,
        config.defaults.home_cards,
    );
    let sliders = config.defaults.home_cuisines.iter().map(|cuisine| {
        fetch_section(
            &client,
            format!("Latest {cuisine} Recipes"),
            FilterSet::from_pairs([("cuisineType", cuisine.as_str())]),
            FilterSet::from_pairs([("cuisineType", cuisine.to_lowercase())]),
            SLIDER_CARDS,
        )
    });
    let (tab, sliders) = futures::join!(tab, join_all(sliders));

    let into_payload = |section: Section| -> Result<SectionPayload> {
        Ok(SectionPayload {
            title: section.title,
            show_more: QueryCodec::encode(&section.show_more),
            recipes: card_views(&section.cards, &store)?,
            message: section.message,
        })
    };
    let payload = HomePayload {
        tab: into_payload(tab)?,
        sliders: sliders
            .into_iter()
            .map(into_payload)
            .collect::<Result<_>>()?,
    };

    let rendered = match format {
        OutputFormat::Text => TextFormatter::home(&payload),
        OutputFormat::Json => JsonFormatter::document(&payload)?,
        OutputFormat::Jsonl => {
            JsonFormatter::lines(std::iter::once(&payload.tab).chain(&payload.sliders))?
        },
    };
    print!("{rendered}");
    Ok(())
}

async fn fetch_section(
    client: &RecipeClient,
    title: String,
    filters: FilterSet,
    show_more: FilterSet,
    limit: usize,
) -> Section {
    let (cards, message) = match client.search(&filters).await {
        Ok(page) => {
            let (mut cards, _) = page.into_parts();
            cards.truncate(limit);
            let message = cards.is_empty().then(|| NO_RECIPE_FOUND.to_string());
            (cards, message)
        },
        Err(err) => {
            warn!("failed to load {title}: {err}");
            (Vec::new(), Some(load_failed(&err)))
        },
    };
    Section {
        title,
        show_more,
        cards,
        message,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
