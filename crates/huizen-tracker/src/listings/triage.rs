use chrono::{DateTime, Utc};

use super::domain::House;
use super::status::Status;

/// Time source seam so triage can run against a fixed clock in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used everywhere outside tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The exact store mutation a triage decision produces: two fields,
/// keyed by the house id. Nothing else is ever rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub id: String,
    pub status: Status,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TriageOutcome {
    /// The requested status equals the current one; nothing is written
    /// and `last_updated` does not churn.
    Unchanged,
    Applied { house: House, change: StatusChange },
}

/// Apply a requested status to a house.
///
/// The status is already a registry member by construction; unknown
/// labels are rejected before this point. Descriptive fields stay
/// untouched.
pub fn apply_status(house: &House, new_status: Status, clock: &dyn Clock) -> TriageOutcome {
    if house.status == new_status {
        return TriageOutcome::Unchanged;
    }

    let last_updated = clock.now();
    let mut updated = house.clone();
    updated.status = new_status;
    updated.last_updated = Some(last_updated);

    TriageOutcome::Applied {
        change: StatusChange {
            id: updated.id.clone(),
            status: new_status,
            last_updated,
        },
        house: updated,
    }
}
