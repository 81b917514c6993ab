//! Booking Repository
//!
//! Per-room booking records, their groups, and the id sequence.

use super::RepoResult;
use chrono::NaiveDate;
use shared::models::BookingRecord;
use sqlx::{SqliteConnection, SqliteExecutor};

const RECORD_COLUMNS: &str = "id, seq, group_id, customer_id, room_id, check_in, check_out, \
                              status, price_per_night, deposit, created_at";

/// Booking record joined with its customer's contact fields
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookingRow {
    pub id: String,
    pub seq: i64,
    pub group_id: i64,
    pub customer_id: i64,
    pub room_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: String,
    pub price_per_night: f64,
    pub deposit: f64,
    pub created_at: i64,
    pub customer_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub tax_id: Option<String>,
}

const JOINED_SELECT: &str = "SELECT b.id, b.seq, b.group_id, b.customer_id, b.room_id, \
     b.check_in, b.check_out, b.status, b.price_per_night, b.deposit, b.created_at, \
     c.name AS customer_name, c.phone, c.email, c.address, c.tax_id \
     FROM booking b JOIN customer c ON c.id = b.customer_id";

/// Stay fields shared by every record of a group
#[derive(Debug, Clone)]
pub struct StayFields<'a> {
    pub customer_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    /// Storage label
    pub status: &'a str,
    pub price_per_night: f64,
    pub deposit: f64,
}

/// Render a sequence value as a booking id.
///
/// Zero padding keeps lexicographic order equal to numeric order.
pub fn format_booking_id(seq: i64) -> String {
    format!("BK{seq:06}")
}

/// Draw the next booking id from the sequence.
///
/// Runs inside the caller's transaction; the row lock held by the UPDATE
/// serializes concurrent writers.
pub async fn next_booking_id<'e>(executor: impl SqliteExecutor<'e>) -> RepoResult<(String, i64)> {
    let seq = sqlx::query_scalar::<_, i64>(
        "UPDATE booking_sequence SET value = value + 1 WHERE name = 'booking' RETURNING value",
    )
    .fetch_one(executor)
    .await?;
    Ok((format_booking_id(seq), seq))
}

pub async fn create_group<'e>(executor: impl SqliteExecutor<'e>, now: i64) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO booking_group (created_at) VALUES (?) RETURNING id",
    )
    .bind(now)
    .fetch_one(executor)
    .await?;
    Ok(id)
}

/// Insert one record for `room_id` with a freshly drawn id
pub async fn insert_record(
    conn: &mut SqliteConnection,
    group_id: i64,
    room_id: &str,
    stay: &StayFields<'_>,
    now: i64,
) -> RepoResult<String> {
    let (id, seq) = next_booking_id(&mut *conn).await?;
    sqlx::query(
        "INSERT INTO booking (id, seq, group_id, customer_id, room_id, check_in, check_out, \
         status, price_per_night, deposit, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(seq)
    .bind(group_id)
    .bind(stay.customer_id)
    .bind(room_id)
    .bind(stay.check_in)
    .bind(stay.check_out)
    .bind(stay.status)
    .bind(stay.price_per_night)
    .bind(stay.deposit)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    Ok(id)
}

pub async fn find_record<'e>(
    executor: impl SqliteExecutor<'e>,
    id: &str,
) -> RepoResult<Option<BookingRecord>> {
    let record = sqlx::query_as::<_, BookingRecord>(&format!(
        "SELECT {RECORD_COLUMNS} FROM booking WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(record)
}

pub async fn find_group_records<'e>(
    executor: impl SqliteExecutor<'e>,
    group_id: i64,
) -> RepoResult<Vec<BookingRecord>> {
    let records = sqlx::query_as::<_, BookingRecord>(&format!(
        "SELECT {RECORD_COLUMNS} FROM booking WHERE group_id = ? ORDER BY seq"
    ))
    .bind(group_id)
    .fetch_all(executor)
    .await?;
    Ok(records)
}

/// Every record with customer fields, grouped by `group_id`
pub async fn find_all_rows<'e>(executor: impl SqliteExecutor<'e>) -> RepoResult<Vec<BookingRow>> {
    let rows = sqlx::query_as::<_, BookingRow>(&format!(
        "{JOINED_SELECT} ORDER BY b.group_id, b.seq"
    ))
    .fetch_all(executor)
    .await?;
    Ok(rows)
}

pub async fn find_group_rows<'e>(
    executor: impl SqliteExecutor<'e>,
    group_id: i64,
) -> RepoResult<Vec<BookingRow>> {
    let rows = sqlx::query_as::<_, BookingRow>(&format!(
        "{JOINED_SELECT} WHERE b.group_id = ? ORDER BY b.seq"
    ))
    .bind(group_id)
    .fetch_all(executor)
    .await?;
    Ok(rows)
}

/// Rooms (distinct) holding a record that overlaps `[check_in, check_out)`,
/// ignoring records of `exclude_group`
pub async fn find_overlapping_rooms<'e>(
    executor: impl SqliteExecutor<'e>,
    check_in: NaiveDate,
    check_out: NaiveDate,
    exclude_group: Option<i64>,
) -> RepoResult<Vec<String>> {
    let rooms = sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT room_id FROM booking \
         WHERE check_in < ? AND check_out > ? AND group_id != ?",
    )
    .bind(check_out)
    .bind(check_in)
    .bind(exclude_group.unwrap_or(-1))
    .fetch_all(executor)
    .await?;
    Ok(rooms)
}

/// Delete the group's record for one room; returns rows removed
pub async fn delete_group_room<'e>(
    executor: impl SqliteExecutor<'e>,
    group_id: i64,
    room_id: &str,
) -> RepoResult<u64> {
    let result = sqlx::query("DELETE FROM booking WHERE group_id = ? AND room_id = ?")
        .bind(group_id)
        .bind(room_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Rewrite the stay fields of every record in the group
pub async fn update_group_stay<'e>(
    executor: impl SqliteExecutor<'e>,
    group_id: i64,
    stay: &StayFields<'_>,
) -> RepoResult<u64> {
    let result = sqlx::query(
        "UPDATE booking SET customer_id = ?, check_in = ?, check_out = ?, status = ?, \
         price_per_night = ?, deposit = ? WHERE group_id = ?",
    )
    .bind(stay.customer_id)
    .bind(stay.check_in)
    .bind(stay.check_out)
    .bind(stay.status)
    .bind(stay.price_per_night)
    .bind(stay.deposit)
    .bind(group_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}
