//! Cleaning Status Repository

use super::RepoResult;
use sqlx::SqliteExecutor;

/// Every room with its stored status label, `None` when never recorded
pub async fn find_all<'e>(
    executor: impl SqliteExecutor<'e>,
) -> RepoResult<Vec<(String, Option<String>)>> {
    let rows = sqlx::query_as::<_, (String, Option<String>)>(
        "SELECT r.id, cs.status FROM room r \
         LEFT JOIN cleaning_status cs ON cs.room_id = r.id",
    )
    .fetch_all(executor)
    .await?;
    Ok(rows)
}

/// Last write wins; no history kept
pub async fn upsert<'e>(
    executor: impl SqliteExecutor<'e>,
    room_id: &str,
    label: &str,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO cleaning_status (room_id, status, updated_at) VALUES (?, ?, ?) \
         ON CONFLICT(room_id) DO UPDATE SET status = excluded.status, updated_at = excluded.updated_at",
    )
    .bind(room_id)
    .bind(label)
    .bind(now)
    .execute(executor)
    .await?;
    Ok(())
}
