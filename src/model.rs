use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::RecipeError;

/// Minimal recipe record shown in the result grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// One ingredient line of a recipe detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Ingredient {
    pub id: Option<i64>,
    pub name: String,
    /// Ingredient line as written in the source recipe, e.g. "2 cups flour"
    pub original: String,
    pub amount: Option<f64>,
    pub unit: Option<String>,
}

/// Full recipe record fetched when a recipe is opened
///
/// The commonly displayed fields are typed; everything else the service
/// sends is kept untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub extended_ingredients: Vec<Ingredient>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Cuisine filter offered as a category button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    American,
    Italian,
    Japanese,
    Mexican,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::American,
        Category::Italian,
        Category::Japanese,
        Category::Mexican,
    ];

    /// Label shown on the category button
    pub fn label(&self) -> &'static str {
        match self {
            Category::American => "Americana",
            Category::Italian => "Italiana",
            Category::Japanese => "Japonesa",
            Category::Mexican => "Mexicana",
        }
    }

    /// Cuisine identifier understood by the recipe service
    pub fn cuisine(&self) -> &'static str {
        match self {
            Category::American => "American",
            Category::Italian => "Italian",
            Category::Japanese => "Japanese",
            Category::Mexican => "Mexican",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = RecipeError;

    /// Accepts the button label or the cuisine identifier, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| {
                c.label().eq_ignore_ascii_case(wanted) || c.cuisine().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| RecipeError::UnknownCategory(wanted.to_string()))
    }
}

/// Result of a keyword or cuisine search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// At least one recipe matched
    Found(Vec<RecipeSummary>),
    /// The service answered but nothing matched
    Empty,
}

impl SearchOutcome {
    pub fn from_results(results: Vec<RecipeSummary>) -> Self {
        if results.is_empty() {
            SearchOutcome::Empty
        } else {
            SearchOutcome::Found(results)
        }
    }
}
