//! Receipt API

use axum::{Json, Router, extract::State, routing::post};
use shared::error::{AppError, AppResult};
use shared::models::{LogicalBooking, Receipt, ReceiptRequest};

use crate::bookings::receipt::build_receipt;
use crate::core::ServerState;
use crate::db::repository::room;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/receipts", post(create))
}

/// POST /api/receipts (bookings summarised in selection order)
async fn create(
    State(state): State<ServerState>,
    Json(req): Json<ReceiptRequest>,
) -> AppResult<Json<Receipt>> {
    if req.booking_ids.is_empty() {
        return Err(
            AppError::validation("Select at least one booking").with_detail("field", "bookingIds")
        );
    }

    let mut selected: Vec<LogicalBooking> = Vec::with_capacity(req.booking_ids.len());
    for id in &req.booking_ids {
        let booking = state.bookings.get(id).await?;
        if !selected.iter().any(|b| b.id == booking.id) {
            selected.push(booking);
        }
    }

    let rooms = room::find_all(&state.db.pool).await?;
    Ok(Json(build_receipt(&selected, &rooms, state.today())?))
}
