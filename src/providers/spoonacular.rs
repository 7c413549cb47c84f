use crate::config::AppConfig;
use crate::error::RecipeError;
use crate::model::{Category, RecipeDetail, RecipeSummary, SearchOutcome};
use crate::providers::RecipeService;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

pub struct SpoonacularProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SpoonacularProvider {
    /// Create a new Spoonacular provider from configuration
    pub fn new(config: &AppConfig) -> Result<Self, RecipeError> {
        let api_key = config.resolve_api_key().ok_or(RecipeError::MissingApiKey)?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(RecipeError::transport)?;

        Ok(SpoonacularProvider {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        SpoonacularProvider {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json(&self, path: &str, params: &[(&str, String)]) -> Result<Value, RecipeError> {
        debug!("GET {} {:?}", path, params);

        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(&[("apiKey", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(RecipeError::transport)?;

        let status = response.status();
        let body = response.text().await.map_err(RecipeError::transport)?;

        if !status.is_success() {
            return Err(RecipeError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| RecipeError::UnexpectedShape(format!("invalid JSON body: {}", e)))
    }

    async fn complex_search(&self, params: &[(&str, String)]) -> Result<SearchOutcome, RecipeError> {
        let envelope = self.get_json("/recipes/complexSearch", params).await?;
        let results = summaries_from(&envelope, "results")?;
        debug!("complexSearch returned {} recipes", results.len());
        Ok(SearchOutcome::from_results(results))
    }
}

#[async_trait]
impl RecipeService for SpoonacularProvider {
    fn service_name(&self) -> &str {
        "spoonacular"
    }

    async fn fetch_random(&self, count: u32) -> Result<Vec<RecipeSummary>, RecipeError> {
        let envelope = self
            .get_json("/recipes/random", &[("number", count.to_string())])
            .await?;
        let recipes = summaries_from(&envelope, "recipes")?;
        debug!("random returned {} recipes", recipes.len());
        Ok(recipes)
    }

    async fn search_by_keyword(
        &self,
        keyword: &str,
        count: u32,
    ) -> Result<SearchOutcome, RecipeError> {
        self.complex_search(&[
            ("query", keyword.to_string()),
            ("number", count.to_string()),
        ])
        .await
    }

    async fn search_by_cuisine(
        &self,
        category: Category,
        count: u32,
    ) -> Result<SearchOutcome, RecipeError> {
        self.complex_search(&[
            ("cuisine", category.cuisine().to_string()),
            ("number", count.to_string()),
        ])
        .await
    }

    async fn fetch_detail(&self, id: u64) -> Result<RecipeDetail, RecipeError> {
        let body = self
            .get_json(&format!("/recipes/{}/information", id), &[])
            .await?;
        let detail: RecipeDetail = serde_json::from_value(body)
            .map_err(|e| RecipeError::UnexpectedShape(format!("recipe {}: {}", id, e)))?;
        if detail.id != id {
            return Err(RecipeError::UnexpectedShape(format!(
                "asked for recipe {} but got {}",
                id, detail.id
            )));
        }
        Ok(detail)
    }
}

/// Decode the summary array under `key`, dropping entries without a usable id or title.
fn summaries_from(envelope: &Value, key: &str) -> Result<Vec<RecipeSummary>, RecipeError> {
    let items = envelope
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| RecipeError::UnexpectedShape(format!("missing `{}` array", key)))?;

    Ok(items
        .iter()
        .filter_map(|item| match RecipeSummary::deserialize(item) {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!("Skipping malformed recipe entry: {}", e);
                None
            }
        })
        .collect())
}

/// The service reports failures as `{"status": "failure", "code": 402, "message": "..."}`.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
