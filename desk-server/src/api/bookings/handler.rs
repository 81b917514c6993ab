//! Booking API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use shared::error::AppResult;
use shared::models::{BookingInput, LogicalBooking};

use crate::auth::CurrentUser;
use crate::bookings::DEFAULT_SEARCH_LIMIT;
use crate::core::ServerState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub limit: Option<usize>,
}

/// GET /api/bookings (all bookings, or a search when `q` or `limit` is given)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<LogicalBooking>>> {
    let bookings = if query.q.is_none() && query.limit.is_none() {
        state.bookings.list_all().await?
    } else {
        let term = query.q.as_deref().unwrap_or_default();
        let limit = query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        state.bookings.search(term, limit).await?
    };
    Ok(Json(bookings))
}

/// GET /api/bookings/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<LogicalBooking>> {
    Ok(Json(state.bookings.get(&id).await?))
}

/// POST /api/bookings
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<BookingInput>,
) -> AppResult<(StatusCode, Json<LogicalBooking>)> {
    let booking = state.bookings.create(payload).await?;
    tracing::debug!(operator = %current_user.username, booking_id = %booking.id, "Booking created via API");
    Ok((StatusCode::CREATED, Json(booking)))
}

/// PUT /api/bookings/{id}
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<BookingInput>,
) -> AppResult<Json<LogicalBooking>> {
    let booking = state.bookings.update(&id, payload).await?;
    tracing::debug!(operator = %current_user.username, booking_id = %booking.id, "Booking updated via API");
    Ok(Json(booking))
}
