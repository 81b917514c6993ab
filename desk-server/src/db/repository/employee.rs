//! Employee Repository

use super::{RepoError, RepoResult};
use sqlx::SqliteExecutor;

/// Employee row including the password hash (login only)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EmployeeAuth {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub hash_pass: String,
    pub is_active: bool,
}

pub async fn find_by_username<'e>(
    executor: impl SqliteExecutor<'e>,
    username: &str,
) -> RepoResult<Option<EmployeeAuth>> {
    let employee = sqlx::query_as::<_, EmployeeAuth>(
        "SELECT id, username, display_name, hash_pass, is_active FROM employee WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(executor)
    .await?;
    Ok(employee)
}

/// Insert an account; `hash_pass` must already be an argon2 PHC string
pub async fn create<'e>(
    executor: impl SqliteExecutor<'e>,
    username: &str,
    display_name: &str,
    hash_pass: &str,
    now: i64,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO employee (username, display_name, hash_pass, is_active, created_at) \
         VALUES (?, ?, ?, 1, ?) RETURNING id",
    )
    .bind(username)
    .bind(display_name)
    .bind(hash_pass)
    .bind(now)
    .fetch_one(executor)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate(format!("Username {username} exists")),
        other => other,
    })?;
    Ok(id)
}
