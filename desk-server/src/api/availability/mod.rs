//! Availability API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/availability", get(handler::available_rooms))
        .route("/api/availability/calendar", get(handler::calendar))
}
