//! Availability API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Datelike;
use serde::Deserialize;
use shared::codec::parse_display_date;
use shared::error::AppResult;
use shared::models::{CalendarDay, Room};

use crate::api::query::rooms_and_bookings;
use crate::bookings::{BookingError, availability};
use crate::core::ServerState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub exclude_booking_id: Option<String>,
}

/// GET /api/availability?checkIn=&checkOut=&excludeBookingId=
///
/// Missing, malformed or inverted dates give an empty list. The excluded
/// booking may be named by any of its record ids; an unknown id excludes nothing.
pub async fn available_rooms(
    State(state): State<ServerState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<Vec<Room>>> {
    let range = query
        .check_in
        .as_deref()
        .and_then(parse_display_date)
        .zip(query.check_out.as_deref().and_then(parse_display_date));
    let Some((check_in, check_out)) = range else {
        return Ok(Json(Vec::new()));
    };

    let exclude_id = match query.exclude_booking_id.as_deref() {
        Some(id) => match state.bookings.get(id).await {
            Ok(booking) => Some(booking.id),
            Err(BookingError::NotFound(_)) => None,
            Err(e) => return Err(e.into()),
        },
        None => None,
    };

    let (rooms, bookings) = rooms_and_bookings(&state).await?;
    Ok(Json(availability::available_rooms(
        check_in,
        check_out,
        &rooms,
        &bookings,
        exclude_id.as_deref(),
    )))
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// GET /api/availability/calendar?year=&month= (defaults to the current month)
pub async fn calendar(
    State(state): State<ServerState>,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<Vec<CalendarDay>>> {
    let today = state.today();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());

    let (rooms, bookings) = rooms_and_bookings(&state).await?;
    let days = availability::calendar_month(year, month, rooms.len(), &bookings)?;
    Ok(Json(days))
}
