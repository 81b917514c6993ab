//! Room Model

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Room category (view)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    #[serde(rename = "River view")]
    RiverView,
    #[serde(rename = "Standard view")]
    StandardView,
    #[serde(rename = "Cottage")]
    Cottage,
}

impl RoomType {
    pub const ALL: [RoomType; 3] = [Self::RiverView, Self::StandardView, Self::Cottage];

    /// Label used both on the wire and in the `room.room_type` column
    pub const fn label(&self) -> &'static str {
        match self {
            Self::RiverView => "River view",
            Self::StandardView => "Standard view",
            Self::Cottage => "Cottage",
        }
    }
}

/// Bed configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BedType {
    #[serde(rename = "Double bed")]
    Double,
    #[serde(rename = "Twin bed")]
    Twin,
}

impl BedType {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Double => "Double bed",
            Self::Twin => "Twin bed",
        }
    }
}

/// Error for unrecognised room or bed labels
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} label: {value}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for RoomType {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| UnknownLabel {
                kind: "room type",
                value: s.to_string(),
            })
    }
}

impl FromStr for BedType {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Double bed" => Ok(Self::Double),
            "Twin bed" => Ok(Self::Twin),
            _ => Err(UnknownLabel {
                kind: "bed type",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for BedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Room entity
///
/// Reference data seeded by an administrator; the booking flow never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Room number, e.g. "101"
    pub id: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[serde(rename = "bed")]
    pub bed_type: BedType,
    pub floor: i64,
}

/// Order room numbers by numeric value ("9" < "10" < "101").
///
/// Non-numeric ids sort after numeric ones, lexicographically.
pub fn cmp_room_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Sort room ids in place by numeric value
pub fn sort_room_ids(ids: &mut [String]) {
    ids.sort_by(|a, b| cmp_room_ids(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_wire_shape() {
        let room = Room {
            id: "101".into(),
            room_type: RoomType::RiverView,
            bed_type: BedType::Twin,
            floor: 1,
        };
        let json = serde_json::to_value(&room).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "101", "type": "River view", "bed": "Twin bed", "floor": 1})
        );
    }

    #[test]
    fn test_labels_parse() {
        assert_eq!("Cottage".parse::<RoomType>(), Ok(RoomType::Cottage));
        assert_eq!("Double bed".parse::<BedType>(), Ok(BedType::Double));
        assert!("Penthouse".parse::<RoomType>().is_err());
    }

    #[test]
    fn test_numeric_room_order() {
        let mut ids = vec!["201".to_string(), "9".into(), "105".into(), "A1".into(), "10".into()];
        sort_room_ids(&mut ids);
        assert_eq!(ids, vec!["9", "10", "105", "201", "A1"]);
    }
}
