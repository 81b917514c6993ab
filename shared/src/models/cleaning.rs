//! Cleaning Status Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Housekeeping state of a room, independent of bookings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CleaningStatus {
    #[default]
    Clean,
    Dirty,
}

impl CleaningStatus {
    /// Wire name ("CLEAN" / "DIRTY")
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clean => "CLEAN",
            Self::Dirty => "DIRTY",
        }
    }
}

impl FromStr for CleaningStatus {
    type Err = String;

    /// Strict parse of the wire name; used to validate staff input
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CLEAN" => Ok(Self::Clean),
            "DIRTY" => Ok(Self::Dirty),
            other => Err(format!("unknown cleaning status: {other}")),
        }
    }
}

/// Room id -> status for every room in the directory
pub type CleaningStatusMap = BTreeMap<String, CleaningStatus>;

/// Set cleaning status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningStatusUpdate {
    pub status: String,
}
