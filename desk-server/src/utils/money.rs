//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts are stored and serialized as `f64`; arithmetic goes through
//! `Decimal` and is rounded to two places, half away from zero.

use rust_decimal::prelude::*;

use crate::bookings::BookingError;

const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed nightly rate or deposit
pub const MAX_AMOUNT: f64 = 10_000_000.0;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> Result<(), BookingError> {
    if !value.is_finite() {
        return Err(BookingError::Validation(format!(
            "{field_name} must be a finite number, got {value}"
        )));
    }
    Ok(())
}

/// Validate a price or deposit: finite, non-negative, bounded
pub fn validate_amount(value: f64, field_name: &str) -> Result<(), BookingError> {
    require_finite(value, field_name)?;
    if value < 0.0 {
        return Err(BookingError::Validation(format!(
            "{field_name} must be non-negative, got {value}"
        )));
    }
    if value > MAX_AMOUNT {
        return Err(BookingError::Validation(format!(
            "{field_name} exceeds maximum allowed ({MAX_AMOUNT}), got {value}"
        )));
    }
    Ok(())
}

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// `rooms × nights × price`
pub fn line_total(rooms: u32, nights: i64, unit_price: f64) -> Decimal {
    (Decimal::from(rooms) * Decimal::from(nights) * to_decimal(unit_price))
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
