//! Booking Model
//!
//! One [`LogicalBooking`] (one customer, one stay, N rooms) is persisted as N
//! [`BookingRecord`] rows that share a `group_id`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::display_date;

/// Payment state of a booking; a label only, no money moves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Deposit,
    Paid,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 3] = [Self::Unpaid, Self::Deposit, Self::Paid];

    /// Wire name ("UNPAID" / "DEPOSIT" / "PAID")
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "UNPAID",
            Self::Deposit => "DEPOSIT",
            Self::Paid => "PAID",
        }
    }
}

/// Storage row: one room for one stay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BookingRecord {
    /// Generated id, e.g. "BK000042"
    pub id: String,
    /// Value drawn from the booking sequence; orders ids
    pub seq: i64,
    pub group_id: i64,
    pub customer_id: i64,
    pub room_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    /// Storage label of the payment status ("Unpaid" / "Deposit" / "Paid")
    pub status: String,
    pub price_per_night: f64,
    pub deposit: f64,
    pub created_at: i64,
}

/// Booking as seen by the front desk
///
/// `id` and `timestamp` are the smallest id / creation time among the member
/// records; `room_ids` is sorted by numeric room number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicalBooking {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub customer_name: String,
    pub phone: String,
    #[serde(with = "display_date")]
    pub check_in: NaiveDate,
    #[serde(with = "display_date")]
    pub check_out: NaiveDate,
    pub room_ids: Vec<String>,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub deposit_amount: f64,
    pub price_per_night: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
}

impl LogicalBooking {
    /// Whether the booking holds `room_id`
    pub fn has_room(&self, room_id: &str) -> bool {
        self.room_ids.iter().any(|r| r == room_id)
    }

    /// Guest sleeps in the hotel on the night of `day`
    pub fn is_staying_on(&self, day: NaiveDate) -> bool {
        self.check_in <= day && day < self.check_out
    }

    /// Whole nights between check-in and check-out
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days().max(0)
    }
}

/// Create / update booking payload
///
/// Dates and payment status arrive as raw strings so that malformed values
/// surface as validation errors instead of body rejections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingInput {
    pub customer_name: String,
    pub phone: String,
    /// dd/mm/yyyy
    pub check_in: String,
    /// dd/mm/yyyy
    pub check_out: String,
    pub room_ids: Vec<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub deposit_amount: Option<f64>,
    #[serde(default)]
    pub price_per_night: Option<f64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
}
