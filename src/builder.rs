use std::path::PathBuf;

use crate::{
    AppConfig, LocalCache, RecipeBrowser, RecipeError, RecipeService, SpoonacularProvider,
};

/// Builder for assembling a [`RecipeBrowser`]
///
/// Starts from [`AppConfig::default`] unless a loaded configuration is
/// supplied; individual setters override single fields on top of it.
#[derive(Default)]
pub struct RecipeBrowserBuilder {
    config: Option<AppConfig>,
    api_key: Option<String>,
    base_url: Option<String>,
    cache_path: Option<PathBuf>,
    timeout: Option<u64>,
    service: Option<Box<dyn RecipeService>>,
}

impl RecipeBrowserBuilder {
    /// Use a loaded configuration as the base
    ///
    /// # Example
    /// ```no_run
    /// use recipe_browser::{AppConfig, RecipeBrowser};
    ///
    /// let config = AppConfig::load().unwrap();
    /// let builder = RecipeBrowser::builder().config(config);
    /// ```
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the API key directly instead of relying on the environment
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Where the recipe list snapshot is stored
    ///
    /// # Example
    /// ```
    /// use recipe_browser::RecipeBrowser;
    ///
    /// let builder = RecipeBrowser::builder()
    ///     .api_key("your-api-key")
    ///     .cache_path("/tmp/recipes.json");
    /// ```
    pub fn cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(path.into());
        self
    }

    /// Request timeout in seconds
    pub fn timeout(mut self, secs: u64) -> Self {
        self.timeout = Some(secs);
        self
    }

    /// Use a custom recipe service instead of Spoonacular
    pub fn service(mut self, service: Box<dyn RecipeService>) -> Self {
        self.service = Some(service);
        self
    }

    /// Build the browser
    ///
    /// # Errors
    /// Returns `RecipeError::MissingApiKey` when the Spoonacular service is
    /// used and no key is set here, in the config, or in SPOONACULAR_API_KEY.
    pub fn build(self) -> Result<RecipeBrowser, RecipeError> {
        let mut config = self.config.unwrap_or_default();
        if let Some(key) = self.api_key {
            config.api_key = Some(key);
        }
        if let Some(url) = self.base_url {
            config.base_url = url;
        }
        if let Some(path) = self.cache_path {
            config.cache_path = path;
        }
        if self.timeout.is_some() {
            config.timeout = self.timeout;
        }

        let service = match self.service {
            Some(service) => service,
            None => Box::new(SpoonacularProvider::new(&config)?),
        };

        Ok(
            RecipeBrowser::new(service, LocalCache::new(&config.cache_path))
                .with_page_sizes(config.random_count, config.search_count),
        )
    }
}

impl RecipeBrowser {
    /// Creates a new builder for a browser
    ///
    /// # Example
    /// ```
    /// use recipe_browser::RecipeBrowser;
    ///
    /// let builder = RecipeBrowser::builder();
    /// ```
    pub fn builder() -> RecipeBrowserBuilder {
        RecipeBrowserBuilder::default()
    }
}
