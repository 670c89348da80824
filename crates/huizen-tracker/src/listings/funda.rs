use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::domain::RawListing;
use super::source::{ListingSource, SearchQuery, SourceError};

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// JSON search client for funda.nl.
pub struct FundaClient {
    client: Client,
    search_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawListing>,
}

impl FundaClient {
    pub fn new(origin: &str) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            search_url: format!("{}/api/v1/search", origin.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl ListingSource for FundaClient {
    async fn search(&self, query: &SearchQuery, page: u32) -> Result<Vec<RawListing>, SourceError> {
        let response = self
            .client
            .get(&self.search_url)
            .query(query)
            .query(&[("page", page)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Status(response.status()));
        }

        let payload: SearchResponse = response.json().await?;
        Ok(payload.results)
    }
}
