//! Room Repository

use super::{RepoError, RepoResult};
use shared::models::{Room, cmp_room_ids};
use sqlx::{SqliteConnection, SqliteExecutor};

#[derive(sqlx::FromRow)]
struct RoomRow {
    id: String,
    room_type: String,
    bed_type: String,
    floor: i64,
}

impl TryFrom<RoomRow> for Room {
    type Error = RepoError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        Ok(Room {
            room_type: row
                .room_type
                .parse()
                .map_err(|e| RepoError::Corrupt(format!("room {}: {e}", row.id)))?,
            bed_type: row
                .bed_type
                .parse()
                .map_err(|e| RepoError::Corrupt(format!("room {}: {e}", row.id)))?,
            id: row.id,
            floor: row.floor,
        })
    }
}

/// All rooms, ordered by numeric room number
pub async fn find_all<'e>(executor: impl SqliteExecutor<'e>) -> RepoResult<Vec<Room>> {
    let rows = sqlx::query_as::<_, RoomRow>(
        "SELECT id, room_type, bed_type, floor FROM room ORDER BY CAST(id AS INTEGER), id",
    )
    .fetch_all(executor)
    .await?;

    let mut rooms = rows
        .into_iter()
        .map(Room::try_from)
        .collect::<RepoResult<Vec<_>>>()?;
    rooms.sort_by(|a, b| cmp_room_ids(&a.id, &b.id));
    Ok(rooms)
}

pub async fn exists<'e>(executor: impl SqliteExecutor<'e>, id: &str) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM room WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(found.is_some())
}

/// Ids from `ids` that are not in the room directory
pub async fn missing_ids(conn: &mut SqliteConnection, ids: &[String]) -> RepoResult<Vec<String>> {
    let mut missing = Vec::new();
    for id in ids {
        if !exists(&mut *conn, id).await? {
            missing.push(id.clone());
        }
    }
    Ok(missing)
}

pub async fn count<'e>(executor: impl SqliteExecutor<'e>) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM room")
        .fetch_one(executor)
        .await?;
    Ok(n)
}

/// Add a room to the directory (administrative seeding only)
pub async fn insert<'e>(executor: impl SqliteExecutor<'e>, room: &Room) -> RepoResult<()> {
    sqlx::query("INSERT INTO room (id, room_type, bed_type, floor) VALUES (?, ?, ?, ?)")
        .bind(&room.id)
        .bind(room.room_type.label())
        .bind(room.bed_type.label())
        .bind(room.floor)
        .execute(executor)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::{BedType, RoomType};

    fn room(id: &str, room_type: RoomType) -> Room {
        Room {
            id: id.into(),
            room_type,
            bed_type: BedType::Twin,
            floor: 1,
        }
    }

    #[tokio::test]
    async fn test_find_all_numeric_order() {
        let db = DbService::in_memory().await.unwrap();
        for id in ["105", "9", "21"] {
            insert(&db.pool, &room(id, RoomType::Cottage)).await.unwrap();
        }

        let ids: Vec<_> = find_all(&db.pool)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["9", "21", "105"]);
    }

    #[tokio::test]
    async fn test_exists_and_duplicate() {
        let db = DbService::in_memory().await.unwrap();
        insert(&db.pool, &room("101", RoomType::RiverView)).await.unwrap();

        assert!(exists(&db.pool, "101").await.unwrap());
        assert!(!exists(&db.pool, "999").await.unwrap());

        let dup = insert(&db.pool, &room("101", RoomType::Cottage)).await;
        assert!(matches!(dup, Err(RepoError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_unknown_label_is_corrupt() {
        let db = DbService::in_memory().await.unwrap();
        sqlx::query("INSERT INTO room (id, room_type, bed_type, floor) VALUES ('1', 'Penthouse', 'Twin bed', 9)")
            .execute(&db.pool)
            .await
            .unwrap();
        assert!(matches!(find_all(&db.pool).await, Err(RepoError::Corrupt(_))));
    }
}
