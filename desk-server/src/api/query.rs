//! Query-string helpers shared by the handlers

use chrono::NaiveDate;
use shared::codec::parse_display_date;
use shared::error::{AppError, AppResult};
use shared::models::{LogicalBooking, Room};

use crate::core::ServerState;
use crate::db::repository::room;

/// dd/mm/yyyy query value, or `default` when absent or blank
pub fn date_or(value: Option<&str>, field: &str, default: NaiveDate) -> AppResult<NaiveDate> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(raw) => parse_display_date(raw).ok_or_else(|| {
            AppError::validation(format!("{field} must be a dd/mm/yyyy date"))
                .with_detail("field", field)
        }),
    }
}

/// Room directory and every booking, as the pure views expect them
pub async fn rooms_and_bookings(state: &ServerState) -> AppResult<(Vec<Room>, Vec<LogicalBooking>)> {
    let rooms = room::find_all(&state.db.pool).await?;
    let bookings = state.bookings.list_all().await?;
    Ok((rooms, bookings))
}
