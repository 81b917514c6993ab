//! Receipt Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::codec::display_date;

/// One billable line: rooms of one description sharing dates and price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub description: String,
    #[serde(with = "display_date")]
    pub check_in: NaiveDate,
    #[serde(with = "display_date")]
    pub check_out: NaiveDate,
    pub room_count: u32,
    pub nights: i64,
    pub unit_price: f64,
    pub total: f64,
}

/// Bill-to block, taken from the first selected booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptCustomer {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
}

/// Combined receipt for one or more bookings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub receipt_no: String,
    #[serde(with = "display_date")]
    pub issued_on: NaiveDate,
    pub customer: ReceiptCustomer,
    pub lines: Vec<ReceiptLine>,
    pub total_amount: f64,
}

/// Receipt request payload: representative booking ids, in selection order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRequest {
    pub booking_ids: Vec<String>,
}
