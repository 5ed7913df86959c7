use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use super::PageSource;
use super::search::SearchClient;
use crate::config::SearchConfig;

/// HTTP-backed [`PageSource`] for the encyclopedia.
#[derive(Clone)]
pub struct EncyclopediaClient {
    client: Client,
    search: SearchClient,
}

impl EncyclopediaClient {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(u64::from(config.request_timeout_seconds)))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            search: SearchClient::new(client.clone(), config),
            client,
        })
    }
}

#[async_trait::async_trait]
impl PageSource for EncyclopediaClient {
    async fn resolve(&self, title: &str) -> Result<Option<String>> {
        self.search.find_link(title).await
    }

    #[instrument(skip(self))]
    async fn fetch(&self, link: &str) -> Result<String> {
        let response = self
            .client
            .get(link)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {link}"))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(anyhow::anyhow!("Encyclopedia returned {status} for {link}"));
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
