//! Dashboard API (occupancy stats and popular rooms)

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use shared::error::{AppError, AppResult};
use shared::models::{OccupancyPoint, OccupancyView, PopularRoom, RoomType};

use crate::api::query::rooms_and_bookings;
use crate::bookings::occupancy;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/dashboard/occupancy", get(occupancy_stats))
        .route("/api/dashboard/popular-rooms", get(popular_rooms))
}

#[derive(Debug, Default, Deserialize)]
pub struct OccupancyQuery {
    #[serde(default)]
    pub view: OccupancyView,
}

async fn occupancy_stats(
    State(state): State<ServerState>,
    Query(query): Query<OccupancyQuery>,
) -> AppResult<Json<Vec<OccupancyPoint>>> {
    let bookings = state.bookings.list_all().await?;
    Ok(Json(occupancy::occupancy_series(
        query.view,
        state.today(),
        &bookings,
    )))
}

#[derive(Debug, Default, Deserialize)]
pub struct PopularQuery {
    /// Room type label ("River view", ...); absent or "All" means every type
    #[serde(rename = "type")]
    pub room_type: Option<String>,
}

async fn popular_rooms(
    State(state): State<ServerState>,
    Query(query): Query<PopularQuery>,
) -> AppResult<Json<Vec<PopularRoom>>> {
    let room_type = match query.room_type.as_deref().map(str::trim) {
        None | Some("") | Some("All") => None,
        Some(label) => Some(
            label
                .parse::<RoomType>()
                .map_err(|e| AppError::validation(e.to_string()).with_detail("field", "type"))?,
        ),
    };

    let (rooms, bookings) = rooms_and_bookings(&state).await?;
    Ok(Json(occupancy::popular_rooms(&rooms, &bookings, room_type)))
}
