use scraper::Html;
use std::fmt::Write;

use crate::browser::BrowserState;
use crate::model::{Category, RecipeDetail, RecipeSummary};

/// Render the category bar and the result grid, one card per line
pub fn render_grid(state: &BrowserState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", render_categories(state.active_category));

    if state.recipes.is_empty() {
        out.push_str("No recipes to show.\n");
        return out;
    }
    for recipe in &state.recipes {
        let _ = writeln!(out, "{}", render_card(recipe));
    }
    out
}

pub fn render_categories(active: Option<Category>) -> String {
    Category::ALL
        .iter()
        .map(|c| {
            if Some(*c) == active {
                format!("[*{}*]", c.label())
            } else {
                format!("[{}]", c.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_card(recipe: &RecipeSummary) -> String {
    format!("{:>8}  {}", recipe.id, recipe.title)
}

/// Render the detail view for an opened recipe
pub fn render_detail(detail: &RecipeDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}", detail.title);

    let mut facts = Vec::new();
    if let Some(minutes) = detail.ready_in_minutes {
        facts.push(format!("ready in {} min", minutes));
    }
    if let Some(servings) = detail.servings {
        facts.push(format!("{} servings", servings));
    }
    if !facts.is_empty() {
        let _ = writeln!(out, "{}", facts.join(" | "));
    }
    if let Some(image) = &detail.image {
        let _ = writeln!(out, "{}", image);
    }

    if !detail.extended_ingredients.is_empty() {
        out.push_str("\n## Ingredients\n");
        for ingredient in &detail.extended_ingredients {
            let line = if ingredient.original.is_empty() {
                &ingredient.name
            } else {
                &ingredient.original
            };
            let _ = writeln!(out, "- {}", line);
        }
    }

    let instructions = detail
        .instructions
        .as_deref()
        .map(html_to_text)
        .filter(|text| !text.is_empty());
    out.push_str("\n## Instructions\n");
    match instructions {
        Some(text) => {
            let _ = writeln!(out, "{}", text);
        }
        None => out.push_str("No instructions provided.\n"),
    }

    if let Some(source) = &detail.source_url {
        let _ = writeln!(out, "\nSource: {}", source);
    }
    out
}

/// Flatten an HTML fragment to text, one line per non-empty text node.
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment
        .root_element()
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
