//! Booking Aggregate Manager
//!
//! Owns the logical booking: one customer, one stay, one or more rooms,
//! stored as one record per room under a shared booking group. Every write
//! runs in a single transaction; nothing is visible unless all of it
//! commits.

use chrono::NaiveDate;
use shared::codec::{parse_display_date, parse_payment_status, to_storage_payment_status};
use shared::models::{BookingInput, CustomerFields, LogicalBooking, PaymentStatus, sort_room_ids};
use shared::util::now_millis;
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::BTreeSet;

use super::grouping::group_rows;
use super::{BookingError, BookingResult};
use crate::db::repository::booking::{self as booking_repo, StayFields};
use crate::db::repository::{customer, room};
use crate::utils::money::validate_amount;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_ROOMS_PER_BOOKING, MAX_SHORT_TEXT_LEN,
    normalize_optional, validate_booking_optional_text, validate_booking_text,
};

/// Default page size for [`BookingManager::search`]
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Booking input after validation
#[derive(Debug, Clone)]
struct ValidBooking {
    customer: CustomerFields,
    check_in: NaiveDate,
    check_out: NaiveDate,
    /// Deduplicated, numerically sorted
    room_ids: Vec<String>,
    payment_status: PaymentStatus,
    price_per_night: f64,
    deposit: f64,
}

impl ValidBooking {
    fn stay(&self, customer_id: i64) -> StayFields<'static> {
        StayFields {
            customer_id,
            check_in: self.check_in,
            check_out: self.check_out,
            status: to_storage_payment_status(self.payment_status),
            price_per_night: self.price_per_night,
            deposit: self.deposit,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BookingManager {
    pool: SqlitePool,
    default_price: f64,
}

impl BookingManager {
    pub fn new(pool: SqlitePool, default_price: f64) -> Self {
        Self {
            pool,
            default_price,
        }
    }

    /// Create a booking for one or more rooms
    pub async fn create(&self, input: BookingInput) -> BookingResult<LogicalBooking> {
        let valid = validate(input, self.default_price)?;
        let now = now_millis();

        let mut tx = self.pool.begin().await?;
        check_rooms(&mut tx, &valid, None).await?;

        let customer_id = customer::find_or_create(&mut tx, &valid.customer, now).await?;
        let group_id = booking_repo::create_group(&mut *tx, now).await?;
        let stay = valid.stay(customer_id);
        for room_id in &valid.room_ids {
            booking_repo::insert_record(&mut tx, group_id, room_id, &stay, now).await?;
        }
        tx.commit().await?;

        let booking = self.load_group(group_id).await?;
        tracing::info!(
            booking_id = %booking.id,
            group_id,
            rooms = ?booking.room_ids,
            "Booking created"
        );
        Ok(booking)
    }

    /// Every booking, newest first
    pub async fn list_all(&self) -> BookingResult<Vec<LogicalBooking>> {
        let rows = booking_repo::find_all_rows(&self.pool).await?;
        Ok(group_rows(rows))
    }

    /// Bookings matching `term` (name, phone, check-in date or id), newest
    /// first, at most `limit`. An empty term returns the most recent ones.
    pub async fn search(&self, term: &str, limit: usize) -> BookingResult<Vec<LogicalBooking>> {
        let term = term.trim().to_lowercase();
        let found = self
            .list_all()
            .await?
            .into_iter()
            .filter(|b| term.is_empty() || matches_term(b, &term))
            .take(limit)
            .collect();
        Ok(found)
    }

    /// One booking by any of its record ids
    pub async fn get(&self, id: &str) -> BookingResult<LogicalBooking> {
        let record = booking_repo::find_record(&self.pool, id)
            .await?
            .ok_or_else(|| BookingError::NotFound(id.to_string()))?;
        self.load_group(record.group_id).await
    }

    /// Rewrite a booking: customer fields in place, rooms diffed against the
    /// stored group, stay fields applied to every remaining record.
    pub async fn update(&self, id: &str, input: BookingInput) -> BookingResult<LogicalBooking> {
        let valid = validate(input, self.default_price)?;
        let now = now_millis();

        let mut tx = self.pool.begin().await?;
        let record = booking_repo::find_record(&mut *tx, id)
            .await?
            .ok_or_else(|| BookingError::NotFound(id.to_string()))?;
        let group_id = record.group_id;
        check_rooms(&mut tx, &valid, Some(group_id)).await?;

        customer::update(&mut *tx, record.customer_id, &valid.customer, now).await?;

        let current: BTreeSet<String> = booking_repo::find_group_records(&mut *tx, group_id)
            .await?
            .into_iter()
            .map(|r| r.room_id)
            .collect();
        let wanted: BTreeSet<String> = valid.room_ids.iter().cloned().collect();

        for room_id in current.difference(&wanted) {
            booking_repo::delete_group_room(&mut *tx, group_id, room_id).await?;
        }

        let stay = valid.stay(record.customer_id);
        booking_repo::update_group_stay(&mut *tx, group_id, &stay).await?;

        let mut added: Vec<String> = wanted.difference(&current).cloned().collect();
        sort_room_ids(&mut added);
        for room_id in &added {
            booking_repo::insert_record(&mut tx, group_id, room_id, &stay, now).await?;
        }
        tx.commit().await?;

        let booking = self.load_group(group_id).await?;
        tracing::info!(
            booking_id = %booking.id,
            previous_id = %id,
            group_id,
            rooms = ?booking.room_ids,
            "Booking updated"
        );
        Ok(booking)
    }

    async fn load_group(&self, group_id: i64) -> BookingResult<LogicalBooking> {
        let rows = booking_repo::find_group_rows(&self.pool, group_id).await?;
        group_rows(rows)
            .into_iter()
            .next()
            .ok_or_else(|| BookingError::Storage(format!("Booking group {group_id} is empty")))
    }
}

/// Every requested room exists and is free for the stay.
///
/// Runs inside the write transaction so the check and the write see the
/// same state. `own_group` is skipped when editing.
async fn check_rooms(
    conn: &mut SqliteConnection,
    valid: &ValidBooking,
    own_group: Option<i64>,
) -> BookingResult<()> {
    let missing = room::missing_ids(&mut *conn, &valid.room_ids).await?;
    if !missing.is_empty() {
        tracing::warn!(rooms = ?missing, "Booking rejected: unknown rooms");
        return Err(BookingError::Validation(format!(
            "Unknown room(s): {}",
            missing.join(", ")
        )));
    }

    let taken =
        booking_repo::find_overlapping_rooms(&mut *conn, valid.check_in, valid.check_out, own_group)
            .await?;
    let mut clashes: Vec<String> = valid
        .room_ids
        .iter()
        .filter(|r| taken.contains(r))
        .cloned()
        .collect();
    if !clashes.is_empty() {
        sort_room_ids(&mut clashes);
        tracing::warn!(rooms = ?clashes, "Booking rejected: rooms already booked");
        return Err(BookingError::Conflict(clashes));
    }
    Ok(())
}

fn matches_term(booking: &LogicalBooking, term: &str) -> bool {
    booking.customer_name.to_lowercase().contains(term)
        || booking.phone.contains(term)
        || shared::codec::format_display_date(booking.check_in).contains(term)
        || booking.id.to_lowercase().contains(term)
}

fn validate(input: BookingInput, default_price: f64) -> BookingResult<ValidBooking> {
    let name = input.customer_name.trim().to_string();
    let phone = input.phone.trim().to_string();
    validate_booking_text(&name, "customerName", MAX_NAME_LEN)?;
    validate_booking_text(&phone, "phone", MAX_SHORT_TEXT_LEN)?;

    let email = normalize_optional(input.email);
    let address = normalize_optional(input.address);
    let tax_id = normalize_optional(input.tax_id);
    validate_booking_optional_text(&email, "email", MAX_EMAIL_LEN)?;
    validate_booking_optional_text(&address, "address", MAX_ADDRESS_LEN)?;
    validate_booking_optional_text(&tax_id, "taxId", MAX_SHORT_TEXT_LEN)?;

    let check_in = parse_display_date(&input.check_in).ok_or_else(|| {
        BookingError::Validation(format!("checkIn must be a dd/mm/yyyy date, got {:?}", input.check_in))
    })?;
    let check_out = parse_display_date(&input.check_out).ok_or_else(|| {
        BookingError::Validation(format!("checkOut must be a dd/mm/yyyy date, got {:?}", input.check_out))
    })?;
    if check_out <= check_in {
        return Err(BookingError::InvalidDateRange(format!(
            "check-out {} must be after check-in {}",
            input.check_out.trim(),
            input.check_in.trim()
        )));
    }

    let mut room_ids: Vec<String> = input
        .room_ids
        .iter()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if room_ids.is_empty() {
        return Err(BookingError::NoRooms);
    }
    if room_ids.len() > MAX_ROOMS_PER_BOOKING {
        return Err(BookingError::Validation(format!(
            "Too many rooms ({}, max {MAX_ROOMS_PER_BOOKING})",
            room_ids.len()
        )));
    }
    sort_room_ids(&mut room_ids);

    let price_per_night = input.price_per_night.unwrap_or(default_price);
    let deposit = input.deposit_amount.unwrap_or(0.0);
    validate_amount(price_per_night, "pricePerNight")?;
    validate_amount(deposit, "depositAmount")?;

    let payment_status = input
        .payment_status
        .as_deref()
        .map(parse_payment_status)
        .unwrap_or_default();

    Ok(ValidBooking {
        customer: CustomerFields {
            name,
            phone,
            email,
            address,
            tax_id,
        },
        check_in,
        check_out,
        room_ids,
        payment_status,
        price_per_night,
        deposit,
    })
}
