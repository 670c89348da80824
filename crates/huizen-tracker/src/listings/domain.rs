use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::Status;

/// One raw search result as the listing source reports it. Lives only for
/// the duration of an ingestion run; any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawListing {
    pub id: Option<String>,
    /// Street address; the source exposes it as the listing title.
    pub title: Option<String>,
    pub neighbourhood: Option<String>,
    pub city: Option<String>,
    pub price: Option<i64>,
    pub living_area: Option<u32>,
    pub bedrooms: Option<u32>,
    pub postcode: Option<String>,
    /// Relative detail path on the source site.
    pub detail_url: Option<String>,
    /// Free-form availability text ("beschikbaar", "onder bod", ...).
    pub availability: Option<String>,
}

/// A tracked house, persisted in the `houses` table.
///
/// `id` is the source's listing identifier and never changes; `status`
/// (and with it `last_updated`) is the only field revised after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub id: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighbourhood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub price: i64,
    pub surface_m2: u32,
    pub bedrooms: u32,
    /// Absolute link to the listing on the source site.
    pub url: String,
    pub status: Status,
    /// Set on every status mutation, never on insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}
