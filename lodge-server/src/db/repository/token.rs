//! Token registry repository
//!
//! Login inserts a digest; logout and password change remove them.
//! The auth guard checks presence on every protected request.

use super::RepoResult;
use crate::db::models::PrincipalKind;
use sqlx::SqlitePool;

pub async fn register(
    pool: &SqlitePool,
    digest: &str,
    kind: PrincipalKind,
    principal_id: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT OR REPLACE INTO token (digest, principal_kind, principal_id, issued_at) \
         VALUES (?, ?, ?, ?)",
    )
    .bind(digest)
    .bind(kind)
    .bind(principal_id)
    .bind(shared::util::now_millis())
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn is_registered(pool: &SqlitePool, digest: &str) -> RepoResult<bool> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM token WHERE digest = ?")
            .bind(digest)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

pub async fn revoke(pool: &SqlitePool, digest: &str) -> RepoResult<()> {
    sqlx::query("DELETE FROM token WHERE digest = ?")
        .bind(digest)
        .execute(pool)
        .await?;
    Ok(())
}

/// Revoke every token of one principal (used on password change)
pub async fn revoke_all(
    pool: &SqlitePool,
    kind: PrincipalKind,
    principal_id: i64,
) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM token WHERE principal_kind = ? AND principal_id = ?")
        .bind(kind)
        .bind(principal_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}
