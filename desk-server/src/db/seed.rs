//! First-run seeding
//!
//! The room directory is loaded from a JSON file the first time the server
//! starts against an empty database; the initial desk account is created
//! from configuration when missing.

use shared::error::AppError;
use shared::models::Room;
use sqlx::SqlitePool;
use std::path::Path;

use crate::auth::hash_password;
use crate::db::repository::{RepoError, employee, room};
use shared::util::now_millis;

/// Load rooms from `path` when the directory is empty.
///
/// Returns how many rooms were inserted (0 when already seeded).
pub async fn seed_rooms_from_file(pool: &SqlitePool, path: &Path) -> Result<usize, AppError> {
    if room::count(pool).await? > 0 {
        return Ok(0);
    }

    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::internal(format!("Cannot read rooms file {}: {e}", path.display()))
    })?;
    let rooms = parse_rooms(&raw)?;

    let mut tx = pool.begin().await.map_err(RepoError::from)?;
    for r in &rooms {
        room::insert(&mut *tx, r).await?;
    }
    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(count = rooms.len(), file = %path.display(), "Room directory seeded");
    Ok(rooms.len())
}

fn parse_rooms(raw: &str) -> Result<Vec<Room>, AppError> {
    let rooms: Vec<Room> = serde_json::from_str(raw)
        .map_err(|e| AppError::validation(format!("Invalid rooms file: {e}")))?;
    if rooms.iter().any(|r| r.id.trim().is_empty()) {
        return Err(AppError::validation("Invalid rooms file: empty room id"));
    }
    Ok(rooms)
}

/// Create the initial desk account if no employee has `username`
pub async fn ensure_admin(pool: &SqlitePool, username: &str, password: &str) -> Result<(), AppError> {
    if employee::find_by_username(pool, username).await?.is_some() {
        return Ok(());
    }

    let hash = hash_password(password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
    let id = employee::create(pool, username, "Administrator", &hash, now_millis()).await?;
    tracing::info!(employee_id = id, username = %username, "Initial desk account created");
    Ok(())
}
