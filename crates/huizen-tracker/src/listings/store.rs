use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use super::domain::House;
use super::status::Status;

/// Storage seam for the `houses` table.
///
/// Every read is a fresh query; nothing is cached across calls. The
/// store is the only shared mutable resource and must provide atomic
/// single-row update semantics.
#[async_trait]
pub trait HouseStore: Send + Sync {
    async fn all(&self) -> Result<Vec<House>, StoreError>;
    async fn by_status(&self, status: Status) -> Result<Vec<House>, StoreError>;
    async fn fetch(&self, id: &str) -> Result<Option<House>, StoreError>;
    /// Snapshot of every tracked id, taken once at the start of an
    /// ingestion run.
    async fn ids(&self) -> Result<HashSet<String>, StoreError>;
    /// Fails with [`StoreError::Conflict`] when the id is already tracked.
    async fn insert(&self, house: House) -> Result<House, StoreError>;
    /// Rewrites exactly the status and mutation timestamp of one house.
    async fn update_status(
        &self,
        id: &str,
        status: Status,
        last_updated: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Id-ordered in-memory store backing the demo command and tests.
#[derive(Default, Clone)]
pub struct InMemoryHouseStore {
    houses: Arc<Mutex<BTreeMap<String, House>>>,
}

#[async_trait]
impl HouseStore for InMemoryHouseStore {
    async fn all(&self) -> Result<Vec<House>, StoreError> {
        let guard = self.houses.lock().expect("house store mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    async fn by_status(&self, status: Status) -> Result<Vec<House>, StoreError> {
        let guard = self.houses.lock().expect("house store mutex poisoned");
        Ok(guard
            .values()
            .filter(|house| house.status == status)
            .cloned()
            .collect())
    }

    async fn fetch(&self, id: &str) -> Result<Option<House>, StoreError> {
        let guard = self.houses.lock().expect("house store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    async fn ids(&self) -> Result<HashSet<String>, StoreError> {
        let guard = self.houses.lock().expect("house store mutex poisoned");
        Ok(guard.keys().cloned().collect())
    }

    async fn insert(&self, house: House) -> Result<House, StoreError> {
        let mut guard = self.houses.lock().expect("house store mutex poisoned");
        if guard.contains_key(&house.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(house.id.clone(), house.clone());
        Ok(house)
    }

    async fn update_status(
        &self,
        id: &str,
        status: Status,
        last_updated: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut guard = self.houses.lock().expect("house store mutex poisoned");
        match guard.get_mut(id) {
            Some(house) => {
                house.status = status;
                house.last_updated = Some(last_updated);
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }
}
