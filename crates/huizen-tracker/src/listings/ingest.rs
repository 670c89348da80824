use std::collections::HashSet;

use thiserror::Error;

use super::domain::{House, RawListing};
use super::normalize::{normalize, NormalizationError};
use super::ring::PostcodeRing;

/// Filter settings for one ingestion run, passed in explicitly by the
/// caller; the pipeline holds no globals and performs no I/O.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub price_ceiling: i64,
    pub area_floor: u32,
    pub ring: PostcodeRing,
    /// Absolute origin prefixed to raw detail paths.
    pub listing_origin: String,
}

/// Why one raw listing was not accepted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RejectReason {
    #[error("asking price {price} above ceiling {ceiling}")]
    PriceAboveCeiling { price: i64, ceiling: i64 },
    #[error("living area {area} m2 below floor {floor} m2")]
    AreaBelowFloor { area: u32, floor: u32 },
    #[error("postcode {postcode:?} outside the configured ring")]
    OutsideRing { postcode: Option<String> },
    #[error("listing {id} is already tracked")]
    AlreadyTracked { id: String },
    #[error(transparent)]
    Incomplete(#[from] NormalizationError),
}

impl RejectReason {
    /// Short tag used for per-reason counters in run reports.
    pub const fn kind(&self) -> &'static str {
        match self {
            RejectReason::PriceAboveCeiling { .. } => "price",
            RejectReason::AreaBelowFloor { .. } => "area",
            RejectReason::OutsideRing { .. } => "ring",
            RejectReason::AlreadyTracked { .. } => "duplicate",
            RejectReason::Incomplete(_) => "incomplete",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub listing: RawListing,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestOutcome {
    pub accepted: Vec<House>,
    pub rejected: Vec<Rejection>,
}

/// Run every raw listing through the acceptance filters.
///
/// Pure: acceptance is a function of the inputs alone. Listings are
/// judged independently, so their order never changes the outcome, and
/// a listing whose id is in `existing_ids` can never come back accepted.
/// Inserting the accepted houses (before the next run computes its id
/// snapshot) is the caller's job.
pub fn ingest(
    listings: Vec<RawListing>,
    existing_ids: &HashSet<String>,
    config: &IngestConfig,
) -> IngestOutcome {
    let mut outcome = IngestOutcome::default();

    for listing in listings {
        match evaluate(&listing, existing_ids, config) {
            Ok(house) => outcome.accepted.push(house),
            Err(reason) => outcome.rejected.push(Rejection { listing, reason }),
        }
    }

    outcome
}

/// Filter order is fixed: price ceiling, area floor, ring, dedup, then
/// normalization. The first failing check wins.
fn evaluate(
    listing: &RawListing,
    existing_ids: &HashSet<String>,
    config: &IngestConfig,
) -> Result<House, RejectReason> {
    let price = listing.price.ok_or(NormalizationError::MissingPrice)?;
    if price > config.price_ceiling {
        return Err(RejectReason::PriceAboveCeiling {
            price,
            ceiling: config.price_ceiling,
        });
    }

    let area = listing.living_area.ok_or(NormalizationError::MissingArea)?;
    if area < config.area_floor {
        return Err(RejectReason::AreaBelowFloor {
            area,
            floor: config.area_floor,
        });
    }

    if !config
        .ring
        .contains(listing.postcode.as_deref().unwrap_or_default())
    {
        return Err(RejectReason::OutsideRing {
            postcode: listing.postcode.clone(),
        });
    }

    let id = listing.id.as_deref().ok_or(NormalizationError::MissingId)?;
    if existing_ids.contains(id) {
        return Err(RejectReason::AlreadyTracked { id: id.to_string() });
    }

    Ok(normalize(listing, &config.listing_origin)?)
}
