//! Availability Engine
//!
//! Pure functions over the room directory and the logical bookings. Every
//! stay is the half-open range `[check_in, check_out)`: the check-out day
//! is free for the next guest.

use chrono::NaiveDate;
use shared::models::{CalendarDay, LogicalBooking, Room};
use std::collections::HashSet;

use super::{BookingError, BookingResult};
use crate::utils::time::days_in_month;

/// `[a_in, a_out)` and `[b_in, b_out)` share at least one night
#[inline]
pub fn overlaps(a_in: NaiveDate, a_out: NaiveDate, b_in: NaiveDate, b_out: NaiveDate) -> bool {
    a_in < b_out && b_in < a_out
}

/// Rooms with no booking overlapping `[check_in, check_out)`.
///
/// `exclude_id` names the booking being edited; its own rooms are not a
/// conflict. An empty or inverted range has no available rooms.
pub fn available_rooms(
    check_in: NaiveDate,
    check_out: NaiveDate,
    rooms: &[Room],
    bookings: &[LogicalBooking],
    exclude_id: Option<&str>,
) -> Vec<Room> {
    if check_out <= check_in {
        return Vec::new();
    }

    let taken: HashSet<&str> = bookings
        .iter()
        .filter(|b| Some(b.id.as_str()) != exclude_id)
        .filter(|b| overlaps(check_in, check_out, b.check_in, b.check_out))
        .flat_map(|b| b.room_ids.iter().map(String::as_str))
        .collect();

    rooms
        .iter()
        .filter(|r| !taken.contains(r.id.as_str()))
        .cloned()
        .collect()
}

/// Rooms occupied on the night of `day`
pub fn booked_room_count(day: NaiveDate, bookings: &[LogicalBooking]) -> u32 {
    bookings
        .iter()
        .filter(|b| b.is_staying_on(day))
        .map(|b| b.room_ids.len() as u32)
        .sum()
}

/// Every room is taken on the night of `day`.
///
/// Calendar fast path only; the range check still runs on submit.
pub fn is_fully_booked(day: NaiveDate, total_rooms: usize, bookings: &[LogicalBooking]) -> bool {
    booked_room_count(day, bookings) as usize >= total_rooms
}

/// Booked / available counts for each day of a month
pub fn calendar_month(
    year: i32,
    month: u32,
    total_rooms: usize,
    bookings: &[LogicalBooking],
) -> BookingResult<Vec<CalendarDay>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| BookingError::Validation(format!("Invalid month: {month}/{year}")))?;

    let total = total_rooms as u32;
    let days = first
        .iter_days()
        .take(days_in_month(year, month) as usize)
        .map(|date| {
            let booked_count = booked_room_count(date, bookings);
            CalendarDay {
                date,
                booked_count,
                available_count: total.saturating_sub(booked_count),
                is_full: booked_count >= total,
            }
        })
        .collect();
    Ok(days)
}
