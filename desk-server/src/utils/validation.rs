//! Input validation helpers
//!
//! Text length limits and validation functions shared by the handlers and
//! the booking manager. SQLite TEXT has no built-in length enforcement.

use shared::error::AppError;

use crate::bookings::BookingError;

// ── Text length limits ──────────────────────────────────────────────

/// Customer and employee names
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: phone, tax id, username, room id
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Postal addresses printed on receipts
pub const MAX_ADDRESS_LEN: usize = 500;

/// Rooms in a single booking
pub const MAX_ROOMS_PER_BOOKING: usize = 50;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    check_required(value, field, max_len).map_err(AppError::validation)
}

// ── Validation helpers (Booking writes) ─────────────────────────────

/// Validate a required string for booking writes (non-empty + max length).
pub fn validate_booking_text(value: &str, field: &str, max_len: usize) -> Result<(), BookingError> {
    check_required(value, field, max_len).map_err(BookingError::Validation)
}

/// Validate an optional string for booking writes (max length).
pub fn validate_booking_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), BookingError> {
    check_optional(value, field, max_len).map_err(BookingError::Validation)
}

fn check_required(value: &str, field: &str, max_len: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if value.len() > max_len {
        return Err(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ));
    }
    Ok(())
}

fn check_optional(value: &Option<String>, field: &str, max_len: usize) -> Result<(), String> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        ));
    }
    Ok(())
}

/// Trim an optional text field, turning blank values into `None`
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
