//! Listing acquisition and the triage board.
//!
//! The write path runs scraped listings through the filter pipeline and
//! inserts the survivors; the read path derives the board columns; the
//! mutation path moves a single house to a new status. The store and the
//! listing source sit behind traits so every path can be exercised
//! without the network.

pub mod board;
pub mod domain;
pub mod funda;
pub mod ingest;
pub mod normalize;
pub mod rest;
pub mod ring;
pub mod router;
pub mod runner;
pub mod service;
pub mod source;
pub mod status;
pub mod store;
pub mod triage;

pub use board::{board_columns, BoardColumnView};
pub use domain::{House, RawListing};
pub use funda::FundaClient;
pub use ingest::{ingest, IngestConfig, IngestOutcome, RejectReason, Rejection};
pub use normalize::{normalize, NormalizationError};
pub use rest::RestHouseStore;
pub use ring::PostcodeRing;
pub use router::house_router;
pub use runner::{IngestionError, IngestionReport, IngestionRunner};
pub use service::{HouseService, TriageError};
pub use source::{ListingSource, OfferingType, SearchQuery, SourceError};
pub use status::{BoardColumn, Status};
pub use store::{HouseStore, InMemoryHouseStore, StoreError};
pub use triage::{apply_status, Clock, StatusChange, SystemClock, TriageOutcome};
