use crate::error::SearchError;
use crate::models::Listing;
use crate::sources::traits::DealsSource;
use crate::sources::types::ClientConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

/// CheapShark API client
pub struct CheapSharkClient {
    client: Client,
    config: ClientConfig,
}

impl CheapSharkClient {
    /// Create a new client against the public API
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom connection settings
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/1.0/{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }

    /// `GET /1.0/deals?storeID=<store>&title=<title>`
    pub fn deals_url(&self, title: &str) -> String {
        format!(
            "{}?storeID={}&title={}",
            self.api_url("deals"),
            self.config.store_id,
            encode_component(title)
        )
    }

    /// `GET /1.0/games?id=<gameID>`
    pub fn game_url(&self, game_id: &str) -> String {
        format!("{}?id={}", self.api_url("games"), encode_component(game_id))
    }
}

/// Percent-encode a query value with the same unreserved set as
/// `encodeURIComponent`, which also leaves `!*'()` as is.
pub fn encode_component(value: &str) -> String {
    urlencoding::encode(value)
        .replace("%21", "!")
        .replace("%2A", "*")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
}

/// Pull `info.thumb` out of a game lookup body. Anything missing or of the
/// wrong shape means there is no high resolution image.
pub fn extract_game_thumb(body: &Value) -> Option<String> {
    body.get("info")
        .and_then(|info| info.get("thumb"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|thumb| !thumb.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl DealsSource for CheapSharkClient {
    async fn fetch_deals(&self, title: &str) -> Result<Vec<Listing>, SearchError> {
        let url = self.deals_url(title);
        info!(title = title, "Searching deals");
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(SearchError::transport)?;

        if !response.status().is_success() {
            warn!("Deals endpoint returned status: {}", response.status());
            return Err(SearchError::status(response.status()));
        }

        let body = response.text().await.map_err(SearchError::transport)?;
        debug!("Downloaded {} bytes of deals", body.len());

        let listings: Vec<Listing> = serde_json::from_str(&body)?;
        Ok(listings)
    }

    async fn fetch_game_thumb(&self, game_id: &str) -> Result<Option<String>> {
        let url = self.game_url(game_id);
        debug!("Fetching URL: {}", url);

        let body: Value = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Game lookup failed for {}", game_id))?
            .error_for_status()
            .with_context(|| format!("Game lookup returned error for {}", game_id))?
            .json()
            .await
            .with_context(|| format!("Game lookup for {} was not JSON", game_id))?;

        Ok(extract_game_thumb(&body))
    }

    async fn image_loads(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(url = url, error = %e, "Image failed to load");
                false
            }
        }
    }

    fn source_name(&self) -> &'static str {
        "CheapShark"
    }
}
