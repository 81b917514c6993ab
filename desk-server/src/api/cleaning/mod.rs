//! Cleaning status API

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use shared::error::AppResult;
use shared::models::{CleaningStatusMap, CleaningStatusUpdate};

use crate::cleaning;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/cleaning-status", get(get_all))
        .route("/api/cleaning-status/{room_id}", put(set))
}

/// GET /api/cleaning-status
async fn get_all(State(state): State<ServerState>) -> AppResult<Json<CleaningStatusMap>> {
    Ok(Json(cleaning::get_all(&state.db.pool).await?))
}

/// PUT /api/cleaning-status/{room_id} (returns the full updated map)
async fn set(
    State(state): State<ServerState>,
    Path(room_id): Path<String>,
    Json(payload): Json<CleaningStatusUpdate>,
) -> AppResult<Json<CleaningStatusMap>> {
    cleaning::set(&state.db.pool, &room_id, &payload.status).await?;
    Ok(Json(cleaning::get_all(&state.db.pool).await?))
}
