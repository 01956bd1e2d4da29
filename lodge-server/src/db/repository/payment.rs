//! Payment Repository (支付记录)

use super::{RepoError, RepoResult};
use shared::models::{Payment, PaymentMethod, PaymentState};
use sqlx::SqlitePool;

const COLUMNS: &str =
    "id, hotel_id, room_id, booking_id, payment_method, amount, transaction_id, payment_date, status, created_at";

pub struct NewPayment {
    pub hotel_id: i64,
    pub room_id: i64,
    pub booking_id: i64,
    pub payment_method: PaymentMethod,
    /// Minor currency units
    pub amount: i64,
    pub transaction_id: String,
    pub status: PaymentState,
}

pub async fn create(pool: &SqlitePool, data: NewPayment) -> RepoResult<Payment> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();

    sqlx::query(
        "INSERT INTO payment (id, hotel_id, room_id, booking_id, payment_method, amount, \
           transaction_id, payment_date, status, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(data.hotel_id)
    .bind(data.room_id)
    .bind(data.booking_id)
    .bind(data.payment_method)
    .bind(data.amount)
    .bind(&data.transaction_id)
    .bind(now)
    .bind(data.status)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create payment".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Payment>> {
    let payment =
        sqlx::query_as::<_, Payment>(&format!("SELECT {COLUMNS} FROM payment WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(payment)
}

/// All payments across hotels, newest first (owner view)
pub async fn find_page(pool: &SqlitePool, limit: i64, offset: i64) -> RepoResult<Vec<Payment>> {
    let payments = sqlx::query_as::<_, Payment>(&format!(
        "SELECT {COLUMNS} FROM payment ORDER BY payment_date DESC LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(payments)
}

pub async fn count_all(pool: &SqlitePool) -> RepoResult<i64> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM payment")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

/// Payments of one hotel, newest first (staff view)
pub async fn find_by_hotel(
    pool: &SqlitePool,
    hotel_id: i64,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Payment>> {
    let payments = sqlx::query_as::<_, Payment>(&format!(
        "SELECT {COLUMNS} FROM payment WHERE hotel_id = ? ORDER BY payment_date DESC LIMIT ? OFFSET ?"
    ))
    .bind(hotel_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(payments)
}

pub async fn count_by_hotel(pool: &SqlitePool, hotel_id: i64) -> RepoResult<i64> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM payment WHERE hotel_id = ?")
        .bind(hotel_id)
        .fetch_one(pool)
        .await?;
    Ok(total)
}

/// Lifetime revenue in minor units. An empty ledger sums to 0.
pub async fn total_amount(pool: &SqlitePool) -> RepoResult<i64> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COALESCE(SUM(amount), 0) FROM payment")
        .fetch_one(pool)
        .await?;
    Ok(total)
}
