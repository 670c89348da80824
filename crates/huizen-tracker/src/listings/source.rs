use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::domain::RawListing;

/// Whether the search asks for sale or rental listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferingType {
    Buy,
    Rent,
}

impl OfferingType {
    pub const fn label(self) -> &'static str {
        match self {
            OfferingType::Buy => "buy",
            OfferingType::Rent => "rent",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "buy" => Some(OfferingType::Buy),
            "rent" => Some(OfferingType::Rent),
            _ => None,
        }
    }
}

/// Search parameters forwarded to the listing source, one page at a time.
/// Serializes straight into the request's query string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    pub location: String,
    pub offering_type: OfferingType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_label: Option<String>,
    pub sort: String,
}

/// Seam over the external listing source so ingestion runs can be fed
/// canned pages in tests.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn search(&self, query: &SearchQuery, page: u32) -> Result<Vec<RawListing>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("search responded with {0}")]
    Status(reqwest::StatusCode),
}
