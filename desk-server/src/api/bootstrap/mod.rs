//! Bootstrap API: everything the desk loads right after login

use axum::{Json, Router, extract::State, routing::get};
use shared::client::DeskSnapshot;
use shared::error::AppResult;

use crate::api::query::rooms_and_bookings;
use crate::cleaning;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/bootstrap", get(bootstrap))
}

async fn bootstrap(State(state): State<ServerState>) -> AppResult<Json<DeskSnapshot>> {
    let (rooms, bookings) = rooms_and_bookings(&state).await?;
    let cleaning_status = cleaning::get_all(&state.db.pool).await?;
    Ok(Json(DeskSnapshot {
        rooms,
        bookings,
        cleaning_status,
    }))
}
