//! Search and browse recipes from the Spoonacular API.
//!
//! The crate keeps one recipe list, one optional category filter and one
//! optional opened recipe in a [`RecipeBrowser`], and mirrors the list to a
//! JSON snapshot so the next session starts with something on screen.
//!
//! ```no_run
//! use recipe_browser::{view, RecipeBrowser};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let browser = RecipeBrowser::builder().api_key("your-api-key").build()?;
//! browser.initialize().await;
//! browser.search("pasta").await;
//! println!("{}", view::render_grid(&browser.state().await));
//! # Ok(())
//! # }
//! ```

pub mod browser;
pub mod builder;
pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod providers;
pub mod view;

pub use browser::{BrowserState, Notice, NoticeLevel, Outcome, RecipeBrowser};
pub use builder::RecipeBrowserBuilder;
pub use cache::LocalCache;
pub use config::AppConfig;
pub use error::RecipeError;
pub use model::{Category, Ingredient, RecipeDetail, RecipeSummary, SearchOutcome};
pub use providers::{RecipeService, SpoonacularProvider};

/// Build a browser from `config.toml` and the environment
pub fn browser_from_env() -> Result<RecipeBrowser, RecipeError> {
    let config = AppConfig::load()?;
    log::debug!("{:?}", config);
    RecipeBrowser::builder().config(config).build()
}
