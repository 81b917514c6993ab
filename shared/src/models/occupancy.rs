//! Occupancy view models (calendar, room status board, dashboard)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{LogicalBooking, Room};
use crate::codec::display_date;

/// One cell of the booking calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    #[serde(with = "display_date")]
    pub date: NaiveDate,
    pub booked_count: u32,
    pub available_count: u32,
    pub is_full: bool,
}

/// Arrivals, departures and in-house guests for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOverview {
    #[serde(with = "display_date")]
    pub date: NaiveDate,
    pub check_ins: Vec<LogicalBooking>,
    pub check_outs: Vec<LogicalBooking>,
    pub in_house: Vec<LogicalBooking>,
}

/// Per-room flag on the room status board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatusFlag {
    Vacant,
    CheckIn,
    CheckOut,
    Occupied,
}

/// One row of the room status board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStatusEntry {
    pub room: Room,
    pub flags: Vec<RoomStatusFlag>,
    pub bookings: Vec<LogicalBooking>,
}

/// Room status board ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomSort {
    #[default]
    Id,
    Type,
    Bed,
}

/// Dashboard occupancy granularity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupancyView {
    #[default]
    Daily,
    Monthly,
    Yearly,
}

/// One bar of the occupancy chart
///
/// `label` is `dd/mm/yyyy` for daily points, `mm/yyyy` for monthly and
/// `yyyy` for yearly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyPoint {
    pub label: String,
    pub occupancy: f64,
}

/// Booking count for one room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularRoom {
    pub room_id: String,
    pub bookings: u32,
}
