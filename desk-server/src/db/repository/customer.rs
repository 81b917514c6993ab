//! Customer Repository

use super::{RepoError, RepoResult};
use shared::models::{Customer, CustomerFields};
use sqlx::{SqliteConnection, SqliteExecutor};

const COLUMNS: &str = "id, name, phone, email, address, tax_id, created_at, updated_at";

pub async fn find_by_id<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
) -> RepoResult<Option<Customer>> {
    let customer = sqlx::query_as::<_, Customer>(&format!(
        "SELECT {COLUMNS} FROM customer WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(customer)
}

/// Oldest customer with exactly this name and phone
pub async fn find_by_name_phone<'e>(
    executor: impl SqliteExecutor<'e>,
    name: &str,
    phone: &str,
) -> RepoResult<Option<Customer>> {
    let customer = sqlx::query_as::<_, Customer>(&format!(
        "SELECT {COLUMNS} FROM customer WHERE name = ? AND phone = ? ORDER BY id LIMIT 1"
    ))
    .bind(name)
    .bind(phone)
    .fetch_optional(executor)
    .await?;
    Ok(customer)
}

pub async fn insert<'e>(
    executor: impl SqliteExecutor<'e>,
    data: &CustomerFields,
    now: i64,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO customer (name, phone, email, address, tax_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(&data.address)
    .bind(&data.tax_id)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await?;
    Ok(id)
}

/// Overwrite every contact field, including name and phone
pub async fn update<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
    data: &CustomerFields,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE customer SET name = ?, phone = ?, email = ?, address = ?, tax_id = ?, updated_at = ? \
         WHERE id = ?",
    )
    .bind(&data.name)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(&data.address)
    .bind(&data.tax_id)
    .bind(now)
    .bind(id)
    .execute(executor)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Customer {id} not found")));
    }
    Ok(())
}

/// Find by (name, phone) or create.
///
/// A match gets its email, address and tax id replaced by `data` (no merge).
pub async fn find_or_create(
    conn: &mut SqliteConnection,
    data: &CustomerFields,
    now: i64,
) -> RepoResult<i64> {
    match find_by_name_phone(&mut *conn, &data.name, &data.phone).await? {
        Some(existing) => {
            update(&mut *conn, existing.id, data, now).await?;
            Ok(existing.id)
        }
        None => insert(&mut *conn, data, now).await,
    }
}
