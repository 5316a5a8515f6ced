//! Serializable views shared by the text and JSON renderers.

use serde::Serialize;
use telma_core::{RecipeCard, RecipeDetail, SavedState};

/// One recipe card with its bookmark state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time: Option<f64>,
    pub cook_time: String,
    pub saved: bool,
    pub uri: String,
}

impl CardView {
    pub fn new(card: &RecipeCard, saved: bool) -> Self {
        Self {
            id: card.id().to_string(),
            title: card.title().to_string(),
            image: card.image.clone(),
            total_time: card.total_time,
            cook_time: card.cook_time().to_string(),
            saved,
            uri: card.uri.clone(),
        }
    }
}

/// Result of `telma recipes`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPayload {
    /// Query string of the user-supplied filters (empty when defaults were used).
    pub query: String,
    pub filter_count: usize,
    pub pages_loaded: usize,
    pub exhausted: bool,
    pub recipes: Vec<CardView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A titled group of cards with a link to the full listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPayload {
    pub title: String,
    /// Query string that lists more recipes of this section.
    pub show_more: String,
    pub recipes: Vec<CardView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Result of `telma home`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePayload {
    pub tab: SectionPayload,
    pub sliders: Vec<SectionPayload>,
}

/// Detail tag with its listing link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagView {
    pub kind: &'static str,
    pub label: String,
    pub query: String,
}

/// Result of `telma show`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub saved: bool,
    pub ingredient_count: usize,
    pub cook_time: String,
    pub calories: u64,
    pub servings: f64,
    pub tags: Vec<TagView>,
    pub ingredient_lines: Vec<String>,
}

impl DetailView {
    pub fn new(detail: &RecipeDetail, saved: bool) -> Self {
        Self {
            id: detail.id().to_string(),
            title: detail.label.clone(),
            author: detail.source.clone(),
            image: detail.banner().map(|img| img.url.clone()),
            saved,
            ingredient_count: detail.ingredients.len(),
            cook_time: detail.cook_time().to_string(),
            calories: detail.whole_calories(),
            servings: detail.servings,
            tags: detail
                .tags()
                .into_iter()
                .map(|tag| TagView {
                    kind: tag.kind.query_key(),
                    query: tag.listing_query(),
                    label: tag.label,
                })
                .collect(),
            ingredient_lines: detail.ingredient_lines.clone(),
        }
    }
}

/// What a bookmark command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BookmarkAction {
    Added,
    Removed,
    AlreadySaved,
    NotSaved,
}

impl From<SavedState> for BookmarkAction {
    fn from(state: SavedState) -> Self {
        match state {
            SavedState::Added => Self::Added,
            SavedState::Removed => Self::Removed,
        }
    }
}

impl BookmarkAction {
    pub const fn message(self) -> &'static str {
        match self {
            Self::Added => SavedState::Added.message(),
            Self::Removed => SavedState::Removed.message(),
            Self::AlreadySaved => "Already in Recipe book",
            Self::NotSaved => "Not in Recipe book",
        }
    }

    pub const fn saved(self) -> bool {
        matches!(self, Self::Added | Self::AlreadySaved)
    }
}

/// Result of `telma toggle`, `save` and `unsave`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkPayload {
    pub id: String,
    pub action: BookmarkAction,
    pub saved: bool,
    pub message: &'static str,
}

impl BookmarkPayload {
    pub fn new(id: &str, action: BookmarkAction) -> Self {
        Self {
            id: id.to_string(),
            action,
            saved: action.saved(),
            message: action.message(),
        }
    }
}
