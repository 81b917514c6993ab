//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer entity
///
/// Found-or-created by (name, phone) when a booking is made; contact fields
/// are overwritten by later bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub tax_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Contact fields supplied with a booking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerFields {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub tax_id: Option<String>,
}
