//! # CLI Structure and Argument Parsing
//!
//! Command-line interface for `telma`, built with `clap` derive macros.
//!
//! ## Usage Patterns
//!
//! ```bash
//! # Home view: breakfast tab plus cuisine sliders
//! telma home
//! telma home --meal-type dinner
//!
//! # Listing from a query string or from filter flags
//! telma recipes "cuisineType=asian&q=ramen"
//! telma recipes -s "chicken soup" --filter diet=low-fat --pages 3
//!
//! # Detail and bookmarks
//! telma show b79327d05b8e5b838ad6cfd9576b30b6
//! telma toggle b79327d05b8e5b838ad6cfd9576b30b6
//! telma saved --format json
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::utils::cli_args::FormatArg;

/// Main CLI structure for the `telma` command.
#[derive(Parser, Clone, Debug)]
#[command(name = "telma")]
#[command(version)]
#[command(about = "telma - Browse, search and bookmark recipes from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Path to configuration file (overrides autodiscovery). Also via `TELMA_CONFIG`.
    #[arg(long, global = true, value_name = "FILE", env = "TELMA_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Meal-type tabs of the home view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Teatime,
}

impl MealType {
    /// Value sent as `mealType=`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
            Self::Teatime => "teatime",
        }
    }
}

/// Available subcommands for the `telma` CLI.
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Show the home view: one meal-type tab and the cuisine sliders
    Home {
        /// Meal-type tab to show
        #[arg(long = "meal-type", short = 'm', value_enum, default_value_t = MealType::Breakfast)]
        meal_type: MealType,
        #[command(flatten)]
        format: FormatArg,
    },

    /// List recipes matching a query string or filter flags
    #[command(
        after_help = "Examples:\n  telma recipes \"mealType=dinner&q=chicken%20soup\"\n  telma recipes -s pasta --filter cuisineType=italian --pages 2"
    )]
    Recipes(RecipesArgs),

    /// Show one recipe in detail
    Show {
        /// Recipe id (the part of the recipe URI after its last `_`)
        id: String,
        #[command(flatten)]
        format: FormatArg,
    },

    /// Add a recipe to the recipe book, or remove it if already saved
    Toggle {
        /// Recipe id
        id: String,
        #[command(flatten)]
        format: FormatArg,
    },

    /// Add a recipe to the recipe book (no-op if already saved)
    Save {
        /// Recipe id
        id: String,
        #[command(flatten)]
        format: FormatArg,
    },

    /// Remove a recipe from the recipe book (no-op if not saved)
    Unsave {
        /// Recipe id
        id: String,
        #[command(flatten)]
        format: FormatArg,
    },

    /// List saved recipes
    Saved {
        #[command(flatten)]
        format: FormatArg,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Arguments for `telma recipes`.
#[derive(clap::Args, Clone, Debug)]
pub struct RecipesArgs {
    /// Query string such as `cuisineType=asian&q=ramen` (a leading `?` is accepted)
    #[arg(value_name = "QUERY_STRING")]
    pub query: Option<String>,

    /// Free-text search term
    #[arg(short = 's', long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Facet filter as `key=value`; repeatable
    #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Number of pages to load (first page plus follow-up pages)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub pages: Option<u16>,

    #[command(flatten)]
    pub format: FormatArg,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() && !value.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        },
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

impl Commands {
    /// Output format flag of the command, if it has one.
    #[must_use]
    pub const fn format_arg(&self) -> Option<&FormatArg> {
        match self {
            Self::Home { format, .. }
            | Self::Show { format, .. }
            | Self::Toggle { format, .. }
            | Self::Save { format, .. }
            | Self::Unsave { format, .. }
            | Self::Saved { format } => Some(format),
            Self::Recipes(args) => Some(&args.format),
            Self::Completions { .. } => None,
        }
    }
}
