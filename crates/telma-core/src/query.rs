//! Query-string codec for recipe filters.
//!
//! A [`FilterSet`] is an ordered list of `key=value` parameters. The same list
//! form is used for the outgoing API request and for the query string a user
//! passes to `telma recipes`, so both directions go through [`QueryCodec`]
//! and share one escaping rule.
//!
//! ```rust
//! use telma_core::query::{FilterSet, QueryCodec};
//!
//! let params = FilterSet::from_pairs([("mealType", "breakfast"), ("q", "chicken soup")]);
//! let encoded = QueryCodec::encode(&params);
//! assert_eq!(encoded, "mealType=breakfast&q=chicken%20soup");
//! assert_eq!(QueryCodec::decode(&encoded), params);
//! ```

use std::fmt;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// Key reserved for the free-text search term.
pub const SEARCH_KEY: &str = "q";

/// Key used to project response fields.
pub const FIELD_KEY: &str = "field";

/// Fields requested for every recipe card.
pub const CARD_FIELDS: [&str; 4] = ["uri", "label", "image", "totalTime"];

/// Meal types queried when a listing has no filters of its own.
pub const DEFAULT_MEAL_TYPES: [&str; 5] = ["breakfast", "dinner", "lunch", "snack", "teatime"];

/// Bytes escaped inside a key or value.
///
/// Space and `+` are the two characters the API cares about. The separators
/// and `%` itself are escaped as well so any value survives a round trip.
const COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'+')
    .add(b'%')
    .add(b'&')
    .add(b'=')
    .add(b'#')
    .add(b'?');

/// A single `(key, value)` filter or search parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterParam {
    /// Parameter name, e.g. `mealType` or `q`.
    pub key: String,
    /// Parameter value, unescaped.
    pub value: String,
}

impl FilterParam {
    /// Create a parameter from anything string-like.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Classify this parameter as a search term or a facet filter.
    #[must_use]
    pub fn kind(&self) -> ParamKind<'_> {
        if self.key == SEARCH_KEY {
            ParamKind::Search(&self.value)
        } else {
            ParamKind::Facet {
                facet: Facet::from_key(&self.key),
                value: &self.value,
            }
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for FilterParam {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// How a decoded parameter should be applied to the filter controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind<'a> {
    /// Free-text search term (`q`).
    Search(&'a str),
    /// A facet filter whose value selects one filter control.
    Facet {
        /// Which facet the key names.
        facet: Facet,
        /// Selected value.
        value: &'a str,
    },
}

/// Filterable recipe attribute categories.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Facet {
    /// `mealType`
    MealType,
    /// `cuisineType`
    CuisineType,
    /// `dietLabels`
    DietLabels,
    /// `diet`, the form used by tag links on the detail view
    Diet,
    /// `dishType`
    DishType,
    /// Any other key, kept verbatim (including `field`).
    Other(String),
}

impl Facet {
    /// Map a query key to its facet.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key {
            "mealType" => Self::MealType,
            "cuisineType" => Self::CuisineType,
            "dietLabels" => Self::DietLabels,
            "diet" => Self::Diet,
            "dishType" => Self::DishType,
            other => Self::Other(other.to_string()),
        }
    }

    /// The query key for this facet.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::MealType => "mealType",
            Self::CuisineType => "cuisineType",
            Self::DietLabels => "dietLabels",
            Self::Diet => "diet",
            Self::DishType => "dishType",
            Self::Other(key) => key,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Ordered sequence of filter parameters.
///
/// Several parameters may share a key. Order only matters for round-trip
/// fidelity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(Vec<FilterParam>);

impl FilterSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a set from `(key, value)` pairs, keeping their order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().map(FilterParam::from).collect()
    }

    /// The default listing filters: every meal type.
    #[must_use]
    pub fn default_listing() -> Self {
        Self::from_pairs(DEFAULT_MEAL_TYPES.iter().map(|meal| ("mealType", *meal)))
    }

    /// Build the set a filter bar submits: the search text first (when not
    /// blank), then each selected `(facet, value)` control.
    pub fn from_filter_bar<I, K, V>(search: Option<&str>, selections: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut set = Self::new();
        if let Some(text) = search.filter(|s| !s.trim().is_empty()) {
            set.push(SEARCH_KEY, text);
        }
        set.extend(selections.into_iter().map(FilterParam::from));
        set
    }

    /// Append a parameter.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push(FilterParam::new(key, value));
    }

    /// Return a copy with the card field projection appended.
    #[must_use]
    pub fn with_card_fields(mut self) -> Self {
        for field in CARD_FIELDS {
            self.push(FIELD_KEY, field);
        }
        self
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate parameters in order.
    pub fn iter(&self) -> std::slice::Iter<'_, FilterParam> {
        self.0.iter()
    }

    /// The free-text search term, if one is present.
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.0.iter().find_map(|param| match param.kind() {
            ParamKind::Search(term) => Some(term),
            ParamKind::Facet { .. } => None,
        })
    }

    /// Every facet filter, in order.
    pub fn facets(&self) -> impl Iterator<Item = (Facet, &str)> {
        self.0.iter().filter_map(|param| match param.kind() {
            ParamKind::Facet { facet, value } => Some((facet, value)),
            ParamKind::Search(_) => None,
        })
    }

    /// Count shown on the filter badge: every parameter counts once.
    #[must_use]
    pub fn filter_count(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<FilterParam> for FilterSet {
    fn from_iter<T: IntoIterator<Item = FilterParam>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<FilterParam> for FilterSet {
    fn extend<T: IntoIterator<Item = FilterParam>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl IntoIterator for FilterSet {
    type Item = FilterParam;
    type IntoIter = std::vec::IntoIter<FilterParam>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = &'a FilterParam;
    type IntoIter = std::slice::Iter<'a, FilterParam>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Encoder/decoder between [`FilterSet`] and query strings.
pub struct QueryCodec;

impl QueryCodec {
    /// Encode parameters as `key=value` pairs joined by `&`.
    ///
    /// An empty set produces an empty string.
    #[must_use]
    pub fn encode(params: &FilterSet) -> String {
        params
            .iter()
            .map(|param| {
                format!(
                    "{}={}",
                    utf8_percent_encode(&param.key, COMPONENT),
                    utf8_percent_encode(&param.value, COMPONENT)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Decode a query string, with or without its leading `?`.
    ///
    /// A segment without `=` decodes to a key with an empty value. Empty
    /// segments are skipped. Decoding never fails.
    #[must_use]
    pub fn decode(query: &str) -> FilterSet {
        let query = query.strip_prefix('?').unwrap_or(query);
        query
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
                FilterParam::new(unescape(key), unescape(value))
            })
            .collect()
    }
}

fn unescape(component: &str) -> String {
    percent_decode_str(component)
        .decode_utf8_lossy()
        .into_owned()
}
