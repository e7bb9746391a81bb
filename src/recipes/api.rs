use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::RecipeConfig;
use crate::error::{AppError, Result};

// Create a static client to reuse connections
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(10)
        .build()
        .unwrap_or_default()
});

/// A search hit as returned by the recipe API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecipeSummary {
    #[serde(rename = "recipe_id")]
    pub id: String,
    pub title: String,
    #[serde(rename = "publisher")]
    pub author: String,
    #[serde(rename = "image_url")]
    pub image: String,
}

/// Full recipe detail before ingredient parsing.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeData {
    #[serde(rename = "recipe_id")]
    pub id: String,
    pub title: String,
    #[serde(rename = "publisher")]
    pub author: String,
    #[serde(rename = "image_url")]
    pub image: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

#[derive(Deserialize)]
struct SearchResponse {
    count: usize,
    recipes: Vec<RecipeSummary>,
}

#[derive(Deserialize)]
struct RecipeResponse {
    recipe: RecipeData,
}

/// Client for the forkify-style recipe API.
#[derive(Debug, Clone)]
pub struct RecipeClient {
    base_url: String,
    api_key: Option<String>,
}

impl RecipeClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, api_key }
    }

    pub fn from_config(config: &RecipeConfig) -> Self {
        Self::new(config.api_url.clone(), config.api_key.clone())
    }

    pub async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>> {
        let res: SearchResponse = self.get("search", ("q", query)).await?;
        if res.count != res.recipes.len() {
            warn!(
                "API reported {} results for {:?} but sent {}",
                res.count,
                query,
                res.recipes.len()
            );
        }
        Ok(res.recipes)
    }

    pub async fn recipe(&self, id: &str) -> Result<RecipeData> {
        let res: RecipeResponse = self.get("get", ("rId", id)).await?;
        Ok(res.recipe)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, param: (&str, &str)) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} {}={}", url, param.0, param.1);

        let mut request = CLIENT.get(&url).query(&[param]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let res = request.send().await?.error_for_status()?;
        let json: serde_json::Value = res.json().await?;

        // The API reports failures such as unknown ids in the body with a 200.
        if let Some(message) = json.get("error").and_then(|e| e.as_str()) {
            return Err(AppError::FetchError(message.to_string()));
        }

        Ok(serde_json::from_value(json)?)
    }
}
