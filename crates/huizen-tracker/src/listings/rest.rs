use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::config::StoreConfig;

use super::domain::House;
use super::status::Status;
use super::store::{HouseStore, StoreError};

/// PostgREST-style client for the hosted `houses` table.
///
/// Row filters ride along as `column=eq.value` query parameters, writes
/// ask for `return=representation` so a PATCH that matched no row can be
/// told apart from a successful one.
pub struct RestHouseStore {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct IdRow {
    id: String,
}

impl RestHouseStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(&config.key)
            .map_err(|_| StoreError::Unavailable("store key is not a valid header value".into()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.key))
            .map_err(|_| StoreError::Unavailable("store key is not a valid header value".into()))?;
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()
            .map_err(transport)?;

        Ok(Self {
            client,
            endpoint: format!("{}/rest/v1/houses", config.url.trim_end_matches('/')),
        })
    }

    async fn select(&self, filters: &[(&str, String)]) -> Result<Vec<House>, StoreError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("select", "*")])
            .query(filters)
            .send()
            .await
            .map_err(transport)?;

        ensure_success(response)
            .await?
            .json()
            .await
            .map_err(transport)
    }
}

#[async_trait]
impl HouseStore for RestHouseStore {
    async fn all(&self) -> Result<Vec<House>, StoreError> {
        self.select(&[]).await
    }

    async fn by_status(&self, status: Status) -> Result<Vec<House>, StoreError> {
        self.select(&[("status", format!("eq.{}", status.label()))])
            .await
    }

    async fn fetch(&self, id: &str) -> Result<Option<House>, StoreError> {
        let mut rows = self.select(&[("id", format!("eq.{id}"))]).await?;
        Ok(rows.pop())
    }

    async fn ids(&self) -> Result<HashSet<String>, StoreError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("select", "id")])
            .send()
            .await
            .map_err(transport)?;

        let rows: Vec<IdRow> = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(transport)?;
        Ok(rows.into_iter().map(|row| row.id).collect())
    }

    async fn insert(&self, house: House) -> Result<House, StoreError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Prefer", "return=representation")
            .json(&house)
            .send()
            .await
            .map_err(transport)?;

        let mut rows: Vec<House> = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(transport)?;
        rows.pop()
            .ok_or_else(|| StoreError::Unavailable("insert returned no representation".into()))
    }

    async fn update_status(
        &self,
        id: &str,
        status: Status,
        last_updated: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let response = self
            .client
            .patch(&self.endpoint)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(&json!({
                "status": status.label(),
                "last_updated": last_updated.to_rfc3339(),
            }))
            .send()
            .await
            .map_err(transport)?;

        let rows: Vec<House> = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(transport)?;
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

fn transport(err: reqwest::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

async fn ensure_success(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else if status == StatusCode::CONFLICT {
        Err(StoreError::Conflict)
    } else {
        Err(StoreError::Unavailable(format!(
            "store responded with {status}"
        )))
    }
}
