//! # Output Formatting
//!
//! Every command builds one of the views in [`shapes`] and hands it to a
//! renderer for the selected format:
//!
//! - **Text**: colored, human-readable listing (default on a terminal)
//! - **JSON**: one pretty-printed document (default when stdout is piped)
//! - **JSONL**: one compact JSON object per recipe, for streaming into `jq`
//!
//! ```bash
//! telma recipes "cuisineType=asian" --format jsonl | jq -r .title
//! ```

mod json;
pub mod shapes;
mod text;

pub use json::JsonFormatter;
pub use shapes::{
    BookmarkAction, BookmarkPayload, CardView, DetailView, HomePayload, ListingPayload,
    SectionPayload,
};
pub use text::{NO_MORE_RECIPES, NO_RECIPE_FOUND, TextFormatter};

/// Output format selected with `--format`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty text output
    Text,
    /// Single JSON document
    Json,
    /// Newline-delimited JSON
    Jsonl,
}
