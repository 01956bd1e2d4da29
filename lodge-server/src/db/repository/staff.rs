//! Staff Repository

use super::{RepoError, RepoResult};
use crate::db::models::{Staff, StaffCreate, credential};
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Staff>> {
    let staff = sqlx::query_as::<_, Staff>(
        "SELECT id, name, email, hash_pass, role, is_verified, password_changed_at, created_at, updated_at FROM staff WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(staff)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<Staff>> {
    let staff = sqlx::query_as::<_, Staff>(
        "SELECT id, name, email, hash_pass, role, is_verified, password_changed_at, created_at, updated_at FROM staff WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(staff)
}

pub async fn create(pool: &SqlitePool, data: StaffCreate) -> RepoResult<Staff> {
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
        "INSERT INTO staff (id, name, email, hash_pass, role, is_verified, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, 0, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.email)
    .bind(&hash_pass)
    .bind(data.role)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create staff".into()))
}

/// Replace the credential and stamp `password_changed_at`.
pub async fn set_password(pool: &SqlitePool, id: i64, new_password: &str) -> RepoResult<()> {
    let hash_pass = credential::hash_password(new_password)
        .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;
    let now = shared::util::now_millis();

    let rows = sqlx::query(
        "UPDATE staff SET hash_pass = ?, password_changed_at = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&hash_pass)
    .bind(now)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Staff {id} not found")));
    }
    Ok(())
}
