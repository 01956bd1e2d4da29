//! Guest Repository

use super::{RepoError, RepoResult};
use crate::db::models::{Guest, GuestRegister, credential};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, email, hash_pass, is_verified, password_changed_at, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Guest>> {
    let guest = sqlx::query_as::<_, Guest>(&format!("SELECT {COLUMNS} FROM guest WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(guest)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<Guest>> {
    let guest =
        sqlx::query_as::<_, Guest>(&format!("SELECT {COLUMNS} FROM guest WHERE email = ?"))
            .bind(email)
            .fetch_optional(pool)
            .await?;
    Ok(guest)
}

pub async fn create(pool: &SqlitePool, data: GuestRegister) -> RepoResult<Guest> {
    if find_by_email(pool, &data.email).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Email '{}' is already registered",
            data.email
        )));
    }

    let hash_pass = credential::hash_password(&data.password)
        .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO guest (id, name, email, hash_pass, is_verified, created_at, updated_at) \
         VALUES (?, ?, ?, ?, 0, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.email)
    .bind(&hash_pass)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create guest".into()))
}

/// Replace the credential and stamp `password_changed_at`, which
/// invalidates every token issued before now.
pub async fn set_password(pool: &SqlitePool, id: i64, new_password: &str) -> RepoResult<()> {
    let hash_pass = credential::hash_password(new_password)
        .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;
    let now = shared::util::now_millis();

    let rows = sqlx::query(
        "UPDATE guest SET hash_pass = ?, password_changed_at = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&hash_pass)
    .bind(now)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Guest {id} not found")));
    }
    Ok(())
}

/// Payment history, in insertion order
pub async fn payment_ids(pool: &SqlitePool, guest_id: i64) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT payment_id FROM guest_payment WHERE guest_id = ? ORDER BY rowid",
    )
    .bind(guest_id)
    .fetch_all(pool)
    .await?;
    Ok(ids)
}

pub async fn append_payment(pool: &SqlitePool, guest_id: i64, payment_id: i64) -> RepoResult<()> {
    sqlx::query("INSERT INTO guest_payment (guest_id, payment_id) VALUES (?, ?)")
        .bind(guest_id)
        .bind(payment_id)
        .execute(pool)
        .await?;
    Ok(())
}
