use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Environment variable consulted when no key is configured
pub const API_KEY_ENV: &str = "SPOONACULAR_API_KEY";

/// Main application configuration
#[derive(Deserialize, Clone)]
pub struct AppConfig {
    /// API key for the recipe service (can also be set via SPOONACULAR_API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL of the recipe service
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// File holding the last known recipe list
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,
    /// Page size for the random list
    #[serde(default = "default_random_count")]
    pub random_count: u32,
    /// Page size for keyword and cuisine searches
    #[serde(default = "default_search_count")]
    pub search_count: u32,
    /// Request timeout in seconds; transport default when unset
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            cache_path: default_cache_path(),
            random_count: default_random_count(),
            search_count: default_search_count(),
            timeout: None,
        }
    }
}

// The key must never end up in logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("cache_path", &self.cache_path)
            .field("random_count", &self.random_count)
            .field("search_count", &self.search_count)
            .field("timeout", &self.timeout)
            .finish()
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://api.spoonacular.com".to_string()
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("recipes.json")
}

fn default_random_count() -> u32 {
    30
}

fn default_search_count() -> u32 {
    24
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_BROWSER__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_BROWSER__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Configured key, falling back to the SPOONACULAR_API_KEY environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the priority order.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_BROWSER__CACHE_PATH
        .add_source(
            Environment::with_prefix("RECIPE_BROWSER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
