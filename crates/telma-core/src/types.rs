//! Recipe payloads exchanged with the remote API and persisted locally.
//!
//! Field names follow the API's camelCase JSON so that responses deserialize
//! directly and saved records keep the same shape the site stored.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Card projection of a recipe: enough to render a list item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCard {
    /// Canonical recipe URI; the recipe id is its suffix after the last `_`.
    pub uri: String,
    /// Recipe title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Thumbnail image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Total cook time in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<f64>,
}

impl RecipeCard {
    /// Recipe id derived from the URI.
    #[must_use]
    pub fn id(&self) -> &str {
        recipe_id_from_uri(&self.uri)
    }

    /// Title to display, falling back to a placeholder for untitled recipes.
    #[must_use]
    pub fn title(&self) -> &str {
        self.label.as_deref().unwrap_or("Untitled")
    }

    /// Cook time in human units.
    #[must_use]
    pub fn cook_time(&self) -> CookTime {
        CookTime::from_minutes(self.total_time.unwrap_or_default())
    }
}

/// Extract the recipe id from a recipe URI.
///
/// ```
/// use telma_core::recipe_id_from_uri;
///
/// let uri = "http://www.edamam.com/ontologies/edamam.owl#recipe_b79327d05b8e5b838ad6cfd9576b30b6";
/// assert_eq!(recipe_id_from_uri(uri), "b79327d05b8e5b838ad6cfd9576b30b6");
/// assert_eq!(recipe_id_from_uri("plain"), "plain");
/// ```
#[must_use]
pub fn recipe_id_from_uri(uri: &str) -> &str {
    uri.rfind('_').map_or(uri, |idx| &uri[idx + 1..])
}

/// One search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// The recipe card.
    pub recipe: RecipeCard,
}

/// Link object inside `_links`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Absolute URL.
    pub href: String,
}

/// Hypermedia links attached to a search response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    /// Next page of results, absent at the end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Link>,
}

/// A page of search results plus the cursor for the following page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Result cards in API order.
    #[serde(default)]
    pub hits: Vec<Hit>,
    /// Pagination links.
    #[serde(rename = "_links", default)]
    pub links: Links,
}

impl SearchPage {
    /// The opaque next-page URL, if any.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.links.next.as_ref().map(|link| link.href.as_str())
    }

    /// Split into cards and the next cursor.
    #[must_use]
    pub fn into_parts(self) -> (Vec<RecipeCard>, Option<String>) {
        let next = self.links.next.map(|link| link.href);
        let cards = self.hits.into_iter().map(|hit| hit.recipe).collect();
        (cards, next)
    }
}

/// One image rendition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Image URL.
    pub url: String,
    /// Width in pixels.
    #[serde(default)]
    pub width: u32,
    /// Height in pixels.
    #[serde(default)]
    pub height: u32,
}

/// Available image renditions, keyed the way the API names them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[allow(missing_docs)]
pub struct RecipeImages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<ImageInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regular: Option<ImageInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<ImageInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<ImageInfo>,
}

/// A single ingredient entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Free-text ingredient line.
    #[serde(default)]
    pub text: String,
}

/// Full single-recipe payload used by the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    /// Canonical recipe URI.
    pub uri: String,
    /// Recipe title.
    #[serde(default)]
    pub label: String,
    /// Author or publishing site.
    #[serde(default)]
    pub source: String,
    /// Image renditions.
    #[serde(default)]
    pub images: RecipeImages,
    /// Structured ingredients.
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Total cook time in minutes.
    #[serde(default)]
    pub total_time: f64,
    /// Energy for the whole recipe.
    #[serde(default)]
    pub calories: f64,
    /// Cuisine tags.
    #[serde(default)]
    pub cuisine_type: Vec<String>,
    /// Diet tags.
    #[serde(default)]
    pub diet_labels: Vec<String>,
    /// Dish tags.
    #[serde(default)]
    pub dish_type: Vec<String>,
    /// Number of servings.
    #[serde(rename = "yield", default)]
    pub servings: f64,
    /// Human-readable ingredient lines.
    #[serde(default)]
    pub ingredient_lines: Vec<String>,
}

impl RecipeDetail {
    /// Recipe id derived from the URI.
    #[must_use]
    pub fn id(&self) -> &str {
        recipe_id_from_uri(&self.uri)
    }

    /// Largest available image.
    #[must_use]
    pub fn banner(&self) -> Option<&ImageInfo> {
        self.images
            .large
            .as_ref()
            .or(self.images.regular.as_ref())
            .or(self.images.small.as_ref())
            .or(self.images.thumbnail.as_ref())
    }

    /// Cook time in human units.
    #[must_use]
    pub fn cook_time(&self) -> CookTime {
        CookTime::from_minutes(self.total_time)
    }

    /// Whole calories, rounded down.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn whole_calories(&self) -> u64 {
        self.calories.max(0.0).floor() as u64
    }

    /// Tags in display order: cuisines, then diets, then dishes.
    ///
    /// A tag listed under several groups appears once per listing, and every
    /// copy is labelled with the first group it appears in.
    #[must_use]
    pub fn tags(&self) -> Vec<Tag> {
        let mut tags: Vec<Tag> = Vec::new();
        let groups = [
            (TagKind::Cuisine, &self.cuisine_type),
            (TagKind::Diet, &self.diet_labels),
            (TagKind::Dish, &self.dish_type),
        ];
        for (kind, labels) in groups {
            for label in labels {
                let kind = if self.cuisine_type.contains(label) {
                    TagKind::Cuisine
                } else if self.diet_labels.contains(label) {
                    TagKind::Diet
                } else {
                    kind
                };
                tags.push(Tag {
                    kind,
                    label: label.clone(),
                });
            }
        }
        tags
    }

    /// Card projection of this recipe.
    #[must_use]
    pub fn to_card(&self) -> RecipeCard {
        RecipeCard {
            uri: self.uri.clone(),
            label: Some(self.label.clone()).filter(|l| !l.is_empty()),
            image: self.banner().map(|img| img.url.clone()),
            total_time: Some(self.total_time),
        }
    }
}

/// Group a detail tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `cuisineType`
    Cuisine,
    /// `diet`
    Diet,
    /// `dishType`
    Dish,
}

impl TagKind {
    /// Query key used when linking the tag to a listing.
    #[must_use]
    pub const fn query_key(self) -> &'static str {
        match self {
            Self::Cuisine => "cuisineType",
            Self::Diet => "diet",
            Self::Dish => "dishType",
        }
    }
}

/// A clickable tag on the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Group of the tag.
    pub kind: TagKind,
    /// Label as returned by the API.
    pub label: String,
}

impl Tag {
    /// Query string that lists recipes carrying this tag.
    #[must_use]
    pub fn listing_query(&self) -> String {
        crate::QueryCodec::encode(&crate::FilterSet::from_pairs([(
            self.kind.query_key(),
            self.label.to_lowercase(),
        )]))
    }
}

/// Single-recipe lookup response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeLookup {
    /// Full recipe payload.
    pub recipe: RecipeDetail,
}

/// Unit used by [`CookTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    /// Whole days.
    Day,
    /// Whole hours.
    Hour,
    /// Minutes.
    Minute,
}

impl TimeUnit {
    /// Singular unit name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
        }
    }
}

/// Cook time expressed in the largest unit that holds at least one.
///
/// Days and hours are whole; minutes keep any fraction the API reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CookTime {
    /// Amount in `unit`; zero means under a minute.
    pub amount: f64,
    /// Unit of `amount`.
    pub unit: TimeUnit,
}

impl CookTime {
    /// Convert a minute count, picking days, then hours, then minutes.
    #[must_use]
    pub fn from_minutes(minutes: f64) -> Self {
        let minutes = if minutes.is_finite() { minutes.max(0.0) } else { 0.0 };
        let hours = (minutes / 60.0).floor();
        let days = (hours / 24.0).floor();
        if days > 0.0 {
            Self {
                amount: days,
                unit: TimeUnit::Day,
            }
        } else if hours > 0.0 {
            Self {
                amount: hours,
                unit: TimeUnit::Hour,
            }
        } else {
            Self {
                amount: minutes,
                unit: TimeUnit::Minute,
            }
        }
    }
}

impl fmt::Display for CookTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.amount <= 0.0 {
            write!(f, "<1 {}", self.unit.as_str())
        } else {
            write!(f, "{} {}", self.amount, self.unit.as_str())
        }
    }
}
