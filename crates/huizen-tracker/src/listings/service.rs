use std::sync::Arc;

use thiserror::Error;

use super::board::{board_columns, BoardColumnView};
use super::domain::House;
use super::status::Status;
use super::store::{HouseStore, StoreError};
use super::triage::{apply_status, Clock, SystemClock, TriageOutcome};

/// Read and mutation paths behind the dashboard endpoints.
///
/// Nothing is cached: every call is a fresh store round trip, so the
/// board always reflects the table as it is.
pub struct HouseService<R> {
    store: Arc<R>,
    clock: Arc<dyn Clock>,
}

#[derive(Debug, Error)]
pub enum TriageError {
    #[error("'{0}' is not a registered status")]
    UnknownStatus(String),
    #[error("no tracked house with that id")]
    UnknownHouse,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl<R> HouseService<R>
where
    R: HouseStore,
{
    pub fn new(store: Arc<R>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn houses(&self, status: Option<Status>) -> Result<Vec<House>, StoreError> {
        match status {
            Some(status) => self.store.by_status(status).await,
            None => self.store.all().await,
        }
    }

    pub async fn board(&self) -> Result<Vec<BoardColumnView>, StoreError> {
        let houses = self.store.all().await?;
        Ok(board_columns(&houses))
    }

    /// Validate and apply one requested status mutation.
    ///
    /// Unknown labels and unknown ids are rejected before anything is
    /// written; a same-status request returns the house as-is without a
    /// store write.
    pub async fn set_status(&self, id: &str, label: &str) -> Result<House, TriageError> {
        let status = Status::from_label(label)
            .ok_or_else(|| TriageError::UnknownStatus(label.to_string()))?;
        let house = self
            .store
            .fetch(id)
            .await?
            .ok_or(TriageError::UnknownHouse)?;

        match apply_status(&house, status, self.clock.as_ref()) {
            TriageOutcome::Unchanged => Ok(house),
            TriageOutcome::Applied { house, change } => {
                self.store
                    .update_status(&change.id, change.status, change.last_updated)
                    .await?;
                Ok(house)
            }
        }
    }
}
