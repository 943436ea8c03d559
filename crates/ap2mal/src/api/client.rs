//! Jikan API client for anime title searches.

use super::types::{AnimeCandidate, SearchResponse};
use crate::resolver::SearchProvider;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Jikan API v4 client
pub struct JikanClient {
    /// HTTP client
    client: Client,
    /// Base URL for Jikan API
    base_url: String,
}

impl JikanClient {
    /// Create a new Jikan client
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("ap2mal/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Search for anime by title, returning at most `limit` candidates
    pub async fn search_anime(&self, query: &str, limit: u32) -> Result<Vec<AnimeCandidate>> {
        let url = format!("{}/anime", self.base_url);

        debug!(url = %url, query = %query, limit = limit, "Making search request");

        let limit = limit.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("limit", limit.as_str())])
            .send()
            .await
            .with_context(|| format!("Search request failed for '{}'", query))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow!(
                "Search request failed with status {}: {}",
                status,
                error_text
            ));
        }

        let body: SearchResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse search response for '{}'", query))?;

        Ok(body.data)
    }
}

#[async_trait]
impl SearchProvider for JikanClient {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<AnimeCandidate>> {
        self.search_anime(query, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_creation() {
        let client = JikanClient::new("https://api.jikan.moe/v4");
        assert!(client.is_ok());
    }
}
