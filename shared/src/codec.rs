//! Date and status codec
//!
//! Converts between the front desk representation (dd/mm/yyyy dates,
//! `UNPAID`/`CLEAN` style enum names) and the storage representation
//! (ISO dates, human labels in the status columns).
//!
//! Two lenient conversions are kept as named fallback policies:
//! [`DATE_FALLBACK`] and [`PAYMENT_STATUS_FALLBACK`] / [`CLEANING_STATUS_FALLBACK`].
//! Each one logs a warning when it fires. Write paths use the strict
//! [`parse_display_date`] instead.

use chrono::NaiveDate;

use crate::models::{CleaningStatus, PaymentStatus};

/// dd/mm/yyyy
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";
/// YYYY-MM-DD
pub const STORAGE_DATE_FORMAT: &str = "%Y-%m-%d";

/// What a malformed display date turns into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFallback {
    Today,
}

pub const DATE_FALLBACK: DateFallback = DateFallback::Today;
pub const PAYMENT_STATUS_FALLBACK: PaymentStatus = PaymentStatus::Unpaid;
pub const CLEANING_STATUS_FALLBACK: CleaningStatus = CleaningStatus::Dirty;

// ============================================================================
// Dates
// ============================================================================

/// Strict dd/mm/yyyy parse
pub fn parse_display_date(display: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(display.trim(), DISPLAY_DATE_FORMAT).ok()
}

/// Format a calendar date as dd/mm/yyyy
pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Strict YYYY-MM-DD parse
pub fn parse_storage_date(storage: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(storage.trim(), STORAGE_DATE_FORMAT).ok()
}

/// dd/mm/yyyy -> YYYY-MM-DD, falling back to `today` on malformed input
pub fn to_storage_date(raw: &str, today: NaiveDate) -> String {
    let date = match parse_display_date(raw) {
        Some(date) => date,
        None => {
            tracing::warn!(
                input = %raw,
                fallback = ?DATE_FALLBACK,
                "Malformed display date, using fallback"
            );
            today
        }
    };
    date.format(STORAGE_DATE_FORMAT).to_string()
}

/// YYYY-MM-DD -> dd/mm/yyyy; empty string when the stored date is invalid
pub fn from_storage_date(storage: &str) -> String {
    parse_storage_date(storage)
        .map(format_display_date)
        .unwrap_or_default()
}

/// Serde adapter for `NaiveDate` fields carried as dd/mm/yyyy
pub mod display_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_display_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_display_date(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid dd/mm/yyyy date: {raw}")))
    }
}

// ============================================================================
// Payment status
// ============================================================================

pub fn to_storage_payment_status(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Unpaid => "Unpaid",
        PaymentStatus::Deposit => "Deposit",
        PaymentStatus::Paid => "Paid",
    }
}

/// Storage label -> status; unknown labels read as [`PAYMENT_STATUS_FALLBACK`]
pub fn from_storage_payment_status(label: &str) -> PaymentStatus {
    match label {
        "Unpaid" => PaymentStatus::Unpaid,
        "Deposit" => PaymentStatus::Deposit,
        "Paid" => PaymentStatus::Paid,
        other => {
            tracing::warn!(label = %other, "Unknown stored payment status, reading as UNPAID");
            PAYMENT_STATUS_FALLBACK
        }
    }
}

/// Wire name -> status; unknown names become [`PAYMENT_STATUS_FALLBACK`]
pub fn parse_payment_status(name: &str) -> PaymentStatus {
    PaymentStatus::ALL
        .into_iter()
        .find(|s| s.as_str() == name)
        .unwrap_or_else(|| {
            tracing::warn!(input = %name, "Unknown payment status, using UNPAID");
            PAYMENT_STATUS_FALLBACK
        })
}

// ============================================================================
// Cleaning status
// ============================================================================

pub fn to_storage_cleaning_status(status: CleaningStatus) -> &'static str {
    match status {
        CleaningStatus::Clean => "Clean",
        CleaningStatus::Dirty => "Needs Cleaning",
    }
}

/// Storage label -> status; unknown labels read as [`CLEANING_STATUS_FALLBACK`]
pub fn from_storage_cleaning_status(label: &str) -> CleaningStatus {
    match label {
        "Clean" => CleaningStatus::Clean,
        "Needs Cleaning" => CleaningStatus::Dirty,
        other => {
            tracing::warn!(label = %other, "Unknown stored cleaning status, reading as DIRTY");
            CLEANING_STATUS_FALLBACK
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_display_date_roundtrip() {
        let mut day = ymd(2023, 12, 25);
        while day < ymd(2025, 1, 10) {
            let display = format_display_date(day);
            let storage = to_storage_date(&display, ymd(2000, 1, 1));
            assert_eq!(storage, day.format(STORAGE_DATE_FORMAT).to_string());
            assert_eq!(from_storage_date(&storage), display);
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_storage_date_examples() {
        assert_eq!(to_storage_date("10/07/2024", ymd(2000, 1, 1)), "2024-07-10");
        assert_eq!(from_storage_date("2024-02-29"), "29/02/2024");
    }

    #[test]
    fn test_malformed_display_date_falls_back_to_today() {
        let today = ymd(2024, 6, 15);
        assert_eq!(DATE_FALLBACK, DateFallback::Today);
        assert_eq!(to_storage_date("2024-07-10", today), "2024-06-15");
        assert_eq!(to_storage_date("31/02/2024", today), "2024-06-15");
        assert_eq!(to_storage_date("", today), "2024-06-15");
    }

    #[test]
    fn test_invalid_storage_date_formats_empty() {
        assert_eq!(from_storage_date("not-a-date"), "");
        assert_eq!(from_storage_date("2024-13-01"), "");
        assert_eq!(from_storage_date("10/07/2024"), "");
    }

    #[test]
    fn test_strict_parse_rejects() {
        assert!(parse_display_date("10/07/2024").is_some());
        assert!(parse_display_date("2024-07-10").is_none());
        assert!(parse_display_date("32/01/2024").is_none());
        assert!(parse_display_date("hello").is_none());
    }

    #[test]
    fn test_payment_status_roundtrip() {
        for status in PaymentStatus::ALL {
            let label = to_storage_payment_status(status);
            assert_eq!(from_storage_payment_status(label), status);
            assert_eq!(parse_payment_status(status.as_str()), status);
        }
        assert_eq!(to_storage_payment_status(PaymentStatus::Deposit), "Deposit");
    }

    #[test]
    fn test_unknown_payment_status_is_unpaid() {
        assert_eq!(PAYMENT_STATUS_FALLBACK, PaymentStatus::Unpaid);
        assert_eq!(from_storage_payment_status("Refunded"), PaymentStatus::Unpaid);
        assert_eq!(parse_payment_status("paid"), PaymentStatus::Unpaid);
        assert_eq!(parse_payment_status(""), PaymentStatus::Unpaid);
    }

    #[test]
    fn test_cleaning_status_mapping() {
        for status in [CleaningStatus::Clean, CleaningStatus::Dirty] {
            let label = to_storage_cleaning_status(status);
            assert_eq!(from_storage_cleaning_status(label), status);
        }
        assert_eq!(to_storage_cleaning_status(CleaningStatus::Dirty), "Needs Cleaning");
        assert_eq!(CLEANING_STATUS_FALLBACK, CleaningStatus::Dirty);
        assert_eq!(from_storage_cleaning_status("Mopping"), CleaningStatus::Dirty);
    }
}
