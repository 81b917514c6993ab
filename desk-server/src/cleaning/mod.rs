//! Cleaning Status Tracker
//!
//! Per-room housekeeping flag, independent of bookings. Last write wins and
//! no history is kept.

use shared::codec::{from_storage_cleaning_status, to_storage_cleaning_status};
use shared::error::{AppError, ErrorCode};
use shared::models::{CleaningStatus, CleaningStatusMap};
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::db::repository::{cleaning_status, room};

/// Status of every room in the directory; rooms never marked read as CLEAN
pub async fn get_all(pool: &SqlitePool) -> Result<CleaningStatusMap, AppError> {
    let rows = cleaning_status::find_all(pool).await?;
    Ok(rows
        .into_iter()
        .map(|(room_id, label)| {
            let status = label
                .as_deref()
                .map(from_storage_cleaning_status)
                .unwrap_or_default();
            (room_id, status)
        })
        .collect())
}

/// Set one room's status from its wire name ("CLEAN" / "DIRTY")
pub async fn set(pool: &SqlitePool, room_id: &str, status: &str) -> Result<CleaningStatus, AppError> {
    let status: CleaningStatus = status.parse().map_err(|e: String| {
        AppError::with_message(ErrorCode::InvalidCleaningStatus, e).with_detail("status", status)
    })?;

    if !room::exists(pool, room_id).await? {
        return Err(AppError::room_not_found(room_id));
    }

    cleaning_status::upsert(pool, room_id, to_storage_cleaning_status(status), now_millis()).await?;
    tracing::info!(room_id = %room_id, status = status.as_str(), "Cleaning status updated");
    Ok(status)
}
