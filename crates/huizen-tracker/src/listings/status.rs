use serde::{Deserialize, Serialize};

/// Workflow stage of a tracked house. The wire labels are the Dutch
/// values the dashboard and the store have used from the start.
///
/// Any status may move to any other status through an explicit save;
/// validity is membership of this set, not a transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "nieuw")]
    New,
    #[serde(rename = "potential")]
    Potential,
    #[serde(rename = "niet geïnteresseerd")]
    NotInterested,
    #[serde(rename = "bericht gestuurd")]
    MessageSent,
    #[serde(rename = "bezichtiging gepland")]
    ViewingPlanned,
    #[serde(rename = "bezichtiging geweest")]
    ViewingDone,
    #[serde(rename = "bod gedaan")]
    OfferMade,
    #[serde(rename = "niet geboden")]
    NoOffer,
    #[serde(rename = "bod niet geaccepteerd")]
    OfferRejected,
    #[serde(rename = "bod geaccepteerd")]
    OfferAccepted,
}

impl Status {
    /// Every registered status, initial state first.
    pub const ALL: [Status; 10] = [
        Status::New,
        Status::Potential,
        Status::NotInterested,
        Status::MessageSent,
        Status::ViewingPlanned,
        Status::ViewingDone,
        Status::OfferMade,
        Status::NoOffer,
        Status::OfferRejected,
        Status::OfferAccepted,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Status::New => "nieuw",
            Status::Potential => "potential",
            Status::NotInterested => "niet geïnteresseerd",
            Status::MessageSent => "bericht gestuurd",
            Status::ViewingPlanned => "bezichtiging gepland",
            Status::ViewingDone => "bezichtiging geweest",
            Status::OfferMade => "bod gedaan",
            Status::NoOffer => "niet geboden",
            Status::OfferRejected => "bod niet geaccepteerd",
            Status::OfferAccepted => "bod geaccepteerd",
        }
    }

    /// Look a wire label up in the registry. `None` means the label is
    /// not a registered status and the request must be rejected.
    pub fn from_label(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|status| status.label() == value)
    }

    /// The display column this status belongs to. Total: a status without
    /// a column cannot be expressed.
    pub const fn column(self) -> BoardColumn {
        match self {
            Status::New | Status::Potential => BoardColumn::New,
            Status::MessageSent | Status::ViewingPlanned | Status::ViewingDone => {
                BoardColumn::Viewing
            }
            Status::OfferMade => BoardColumn::Offer,
            Status::OfferAccepted => BoardColumn::Won,
            Status::NotInterested | Status::NoOffer | Status::OfferRejected => {
                BoardColumn::Archived
            }
        }
    }

    /// Priority within the status's own column; lower sorts first.
    pub const fn column_rank(self) -> u8 {
        match self {
            // new
            Status::Potential => 0,
            Status::New => 1,
            // viewing
            Status::ViewingPlanned => 0,
            Status::MessageSent => 1,
            Status::ViewingDone => 2,
            // offer / won
            Status::OfferMade => 0,
            Status::OfferAccepted => 0,
            // archived
            Status::OfferRejected => 0,
            Status::NoOffer => 1,
            Status::NotInterested => 2,
        }
    }
}

/// Named display columns of the triage board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardColumn {
    New,
    Viewing,
    Offer,
    Won,
    Archived,
}

impl BoardColumn {
    pub const ALL: [BoardColumn; 5] = [
        BoardColumn::New,
        BoardColumn::Viewing,
        BoardColumn::Offer,
        BoardColumn::Won,
        BoardColumn::Archived,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            BoardColumn::New => "new",
            BoardColumn::Viewing => "viewing",
            BoardColumn::Offer => "offer",
            BoardColumn::Won => "won",
            BoardColumn::Archived => "archived",
        }
    }
}
