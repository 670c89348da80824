use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use super::domain::RawListing;
use super::ingest::{ingest, IngestConfig, IngestOutcome};
use super::source::{ListingSource, SearchQuery, SourceError};
use super::store::{HouseStore, StoreError};

/// One full pass over the listing source: fetch, filter, insert.
///
/// The existing-id snapshot is taken once, before the first page is
/// fetched, and never refreshed mid-run. Runs are meant to be scheduled
/// one at a time; two overlapping runs can race on that snapshot, in
/// which case the second insert fails with a conflict and aborts.
pub struct IngestionRunner<S, R> {
    source: Arc<S>,
    store: Arc<R>,
    query: SearchQuery,
    config: IngestConfig,
    pages: u32,
}

#[derive(Debug, Error)]
pub enum IngestionError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Counters summarizing one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestionReport {
    pub fetched: usize,
    pub inserted: usize,
    pub rejected: usize,
    pub rejected_by_reason: BTreeMap<&'static str, usize>,
}

impl<S, R> IngestionRunner<S, R>
where
    S: ListingSource,
    R: HouseStore,
{
    pub fn new(
        source: Arc<S>,
        store: Arc<R>,
        query: SearchQuery,
        config: IngestConfig,
        pages: u32,
    ) -> Self {
        Self {
            source,
            store,
            query,
            config,
            pages,
        }
    }

    /// Fetch and filter without touching the store (dry runs).
    pub async fn preview(&self) -> Result<IngestOutcome, IngestionError> {
        let existing = self.store.ids().await?;
        let listings = self.fetch_all().await?;
        Ok(ingest(listings, &existing, &self.config))
    }

    /// Full run: filter, then insert every accepted house.
    pub async fn run(&self) -> Result<IngestionReport, IngestionError> {
        let existing = self.store.ids().await?;
        let listings = self.fetch_all().await?;

        let mut report = IngestionReport {
            fetched: listings.len(),
            ..IngestionReport::default()
        };

        let outcome = ingest(listings, &existing, &self.config);

        for rejection in &outcome.rejected {
            debug!(id = ?rejection.listing.id, reason = %rejection.reason, "listing rejected");
            report.rejected += 1;
            *report
                .rejected_by_reason
                .entry(rejection.reason.kind())
                .or_default() += 1;
        }

        for house in outcome.accepted {
            info!(id = %house.id, address = %house.address, price = house.price, "tracking new house");
            self.store.insert(house).await?;
            report.inserted += 1;
        }

        info!(
            fetched = report.fetched,
            inserted = report.inserted,
            rejected = report.rejected,
            "ingestion run finished"
        );

        Ok(report)
    }

    async fn fetch_all(&self) -> Result<Vec<RawListing>, SourceError> {
        let mut listings = Vec::new();
        for page in 0..self.pages {
            listings.extend(self.source.search(&self.query, page).await?);
        }
        Ok(listings)
    }
}
