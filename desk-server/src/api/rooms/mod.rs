//! Room directory API (read-only)

use axum::{Json, Router, extract::State, routing::get};
use shared::error::AppResult;
use shared::models::Room;

use crate::core::ServerState;
use crate::db::repository::room;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/rooms", get(list))
}

/// GET /api/rooms (sorted by numeric room number)
async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Room>>> {
    Ok(Json(room::find_all(&state.db.pool).await?))
}
