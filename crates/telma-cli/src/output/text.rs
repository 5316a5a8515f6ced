//! Text output formatting

use std::fmt::Write as _;

use colored::Colorize;

use super::shapes::{BookmarkPayload, CardView, DetailView, HomePayload, ListingPayload, SectionPayload};

pub const NO_RECIPE_FOUND: &str = "No recipe found";
pub const NO_MORE_RECIPES: &str = "No more recipes";
pub const NO_SAVED_RECIPES: &str = "You haven't saved any recipes yet!";

fn listing_command(query: &str) -> String {
    if query.is_empty() {
        "telma recipes".to_string()
    } else {
        format!("telma recipes \"{query}\"")
    }
}

pub struct TextFormatter;

impl TextFormatter {
    /// One card: bookmark marker and title, then cook time and id.
    pub fn card(card: &CardView) -> String {
        let marker = if card.saved {
            "★".bright_yellow().to_string()
        } else {
            "☆".dimmed().to_string()
        };
        format!(
            "{marker} {}\n    {} · {}",
            card.title.bold(),
            card.cook_time,
            card.id.bright_black()
        )
    }

    fn cards(out: &mut String, cards: &[CardView]) {
        for card in cards {
            let _ = writeln!(out, "{}", Self::card(card));
        }
    }

    pub fn listing(payload: &ListingPayload) -> String {
        let mut out = String::new();
        if payload.filter_count > 0 {
            let _ = writeln!(
                out,
                "{} ({}): {}\n",
                "Filters".bold(),
                payload.filter_count,
                payload.query
            );
        }

        Self::cards(&mut out, &payload.recipes);

        if let Some(message) = &payload.message {
            let _ = writeln!(out, "{}", message.dimmed());
        } else if !payload.exhausted {
            let _ = writeln!(
                out,
                "\nMore recipes available: {} --pages {}",
                listing_command(&payload.query),
                payload.pages_loaded + 1
            );
        }
        out
    }

    fn section(out: &mut String, section: &SectionPayload) {
        let _ = writeln!(out, "{}", section.title.bold().underline());
        if let Some(message) = &section.message {
            let _ = writeln!(out, "{}", message.dimmed());
        } else {
            Self::cards(out, &section.recipes);
            let _ = writeln!(
                out,
                "Show more: {}",
                listing_command(&section.show_more).cyan()
            );
        }
    }

    pub fn home(payload: &HomePayload) -> String {
        let mut out = String::new();
        Self::section(&mut out, &payload.tab);
        for slider in &payload.sliders {
            out.push('\n');
            Self::section(&mut out, slider);
        }
        out
    }

    pub fn detail(view: &DetailView) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", view.title.bold());
        if !view.author.is_empty() {
            let _ = writeln!(out, "by {}", view.author);
        }
        let saved = if view.saved {
            "★ In your Recipe book".bright_yellow().to_string()
        } else {
            format!("☆ Not saved (telma toggle {})", view.id)
        };
        let _ = writeln!(out, "{saved}");
        if let Some(image) = &view.image {
            let _ = writeln!(out, "{}", image.bright_black());
        }

        let _ = writeln!(
            out,
            "\n{} Ingredients · {} · {} Calories · {} Servings",
            view.ingredient_count, view.cook_time, view.calories, view.servings
        );

        if !view.tags.is_empty() {
            let _ = writeln!(out, "\n{}", "Tags".bold());
            for tag in &view.tags {
                let _ = writeln!(
                    out,
                    "  {:<20} {}",
                    tag.label,
                    listing_command(&tag.query).cyan()
                );
            }
        }

        let _ = writeln!(out, "\n{}", "Ingredients".bold());
        for line in &view.ingredient_lines {
            let _ = writeln!(out, "  - {line}");
        }
        out
    }

    pub fn saved(cards: &[CardView]) -> String {
        if cards.is_empty() {
            return format!("{NO_SAVED_RECIPES}\n");
        }
        let mut out = format!("{} ({})\n", "Recipe book".bold(), cards.len());
        Self::cards(&mut out, cards);
        out
    }

    pub fn bookmark(payload: &BookmarkPayload) -> String {
        format!("{} ({})\n", payload.message, payload.id)
    }
}
