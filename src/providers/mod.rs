mod spoonacular;

pub use spoonacular::SpoonacularProvider;

use async_trait::async_trait;

use crate::error::RecipeError;
use crate::model::{Category, RecipeDetail, RecipeSummary, SearchOutcome};

/// Remote source of recipes
///
/// Every call is a single attempt: no retries, no backoff. Transport
/// failures come back as `Err`, while a search with no matches is
/// `Ok(SearchOutcome::Empty)`.
#[async_trait]
pub trait RecipeService: Send + Sync {
    /// Get the service name (e.g., "spoonacular")
    fn service_name(&self) -> &str;

    /// Up to `count` random recipes, in whatever order the service picks
    async fn fetch_random(&self, count: u32) -> Result<Vec<RecipeSummary>, RecipeError>;

    /// Up to `count` recipes matching a free-text query
    async fn search_by_keyword(
        &self,
        keyword: &str,
        count: u32,
    ) -> Result<SearchOutcome, RecipeError>;

    /// Up to `count` recipes of the category's cuisine
    async fn search_by_cuisine(
        &self,
        category: Category,
        count: u32,
    ) -> Result<SearchOutcome, RecipeError>;

    /// Full record for one recipe id
    async fn fetch_detail(&self, id: u64) -> Result<RecipeDetail, RecipeError>;
}

#[async_trait]
impl<T: RecipeService + ?Sized> RecipeService for std::sync::Arc<T> {
    fn service_name(&self) -> &str {
        (**self).service_name()
    }

    async fn fetch_random(&self, count: u32) -> Result<Vec<RecipeSummary>, RecipeError> {
        (**self).fetch_random(count).await
    }

    async fn search_by_keyword(
        &self,
        keyword: &str,
        count: u32,
    ) -> Result<SearchOutcome, RecipeError> {
        (**self).search_by_keyword(keyword, count).await
    }

    async fn search_by_cuisine(
        &self,
        category: Category,
        count: u32,
    ) -> Result<SearchOutcome, RecipeError> {
        (**self).search_by_cuisine(category, count).await
    }

    async fn fetch_detail(&self, id: u64) -> Result<RecipeDetail, RecipeError> {
        (**self).fetch_detail(id).await
    }
}
