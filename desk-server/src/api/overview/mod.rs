//! Front desk day views
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/overview?date= | GET | Arrivals / departures / in-house |
//! | /api/room-status?date=&sort= | GET | Room status board |

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use shared::error::AppResult;
use shared::models::{DayOverview, RoomSort, RoomStatusEntry};

use crate::api::query::{date_or, rooms_and_bookings};
use crate::bookings::occupancy;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/overview", get(overview))
        .route("/api/room-status", get(room_status))
}

#[derive(Debug, Default, Deserialize)]
pub struct DayQuery {
    pub date: Option<String>,
    #[serde(default)]
    pub sort: RoomSort,
}

async fn overview(
    State(state): State<ServerState>,
    Query(query): Query<DayQuery>,
) -> AppResult<Json<DayOverview>> {
    let date = date_or(query.date.as_deref(), "date", state.today())?;
    let bookings = state.bookings.list_all().await?;
    Ok(Json(occupancy::day_overview(date, &bookings)))
}

async fn room_status(
    State(state): State<ServerState>,
    Query(query): Query<DayQuery>,
) -> AppResult<Json<Vec<RoomStatusEntry>>> {
    let date = date_or(query.date.as_deref(), "date", state.today())?;
    let (rooms, bookings) = rooms_and_bookings(&state).await?;
    Ok(Json(occupancy::room_status_board(date, &rooms, &bookings, query.sort)))
}
