//! Booking Repository (预订)
//!
//! Pricing is deliberately simple: nights are the ceiling of the stay
//! in whole days, the total is nights times the room's nightly price.
//! Discounts carried on the room are not applied here.

use super::{RepoError, RepoResult};
use shared::models::{Booking, BookingStatus, BookingView, Guests, PaymentStatus};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, user_id, room_id, hotel_id, check_in_date, check_out_date, number_of_days, total_price, adults, children, status, payment_status, created_at, updated_at";

const VIEW_SELECT: &str = "SELECT g.name AS guest_name, g.email AS guest_email, \
       r.room_number, r.room_type, r.availability AS room_availability, r.floor, \
       h.name AS hotel_name, m.name AS manager_name, \
       b.check_in_date, b.number_of_days, b.total_price, b.adults, b.children \
     FROM booking b \
     JOIN guest g ON g.id = b.user_id \
     JOIN room r ON r.id = b.room_id \
     JOIN hotel h ON h.id = b.hotel_id \
     LEFT JOIN staff m ON m.id = h.manager_id";

/// Nights for a stay: the caller's value when supplied, otherwise the
/// ceiling of the window in whole days.
pub fn number_of_days(check_in_ms: i64, check_out_ms: i64, supplied: Option<i64>) -> i64 {
    supplied.unwrap_or_else(|| {
        ((check_out_ms - check_in_ms) as f64 / 86_400_000f64).ceil() as i64
    })
}

/// total = nights * nightly price, major units
pub fn total_price(days: i64, price_per_night: i64) -> i64 {
    days * price_per_night
}

pub struct NewBooking {
    pub user_id: i64,
    pub room_id: i64,
    pub hotel_id: i64,
    pub check_in_date: i64,
    pub check_out_date: i64,
    pub number_of_days: i64,
    pub total_price: i64,
    pub guests: Guests,
}

pub async fn create(pool: &SqlitePool, data: NewBooking) -> RepoResult<Booking> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();

    sqlx::query(
        "INSERT INTO booking (id, user_id, room_id, hotel_id, check_in_date, check_out_date, \
           number_of_days, total_price, adults, children, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(data.user_id)
    .bind(data.room_id)
    .bind(data.hotel_id)
    .bind(data.check_in_date)
    .bind(data.check_out_date)
    .bind(data.number_of_days)
    .bind(data.total_price)
    .bind(data.guests.adults)
    .bind(data.guests.children)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create booking".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Booking>> {
    let booking =
        sqlx::query_as::<_, Booking>(&format!("SELECT {COLUMNS} FROM booking WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(booking)
}

/// Cancel by the booking guest. Read-then-guard: cancelling twice is an
/// invalid state, not a no-op.
pub async fn cancel(pool: &SqlitePool, id: i64, user_id: i64) -> RepoResult<Booking> {
    let booking = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Booking {id} not found")))?;

    if booking.user_id != user_id {
        return Err(RepoError::NotFound(format!("Booking {id} not found")));
    }
    if booking.status == BookingStatus::Cancelled {
        return Err(RepoError::InvalidState("Booking is already cancelled".into()));
    }

    set_status(pool, id, BookingStatus::Cancelled).await?;
    require(pool, id).await
}

/// Cancel on behalf of a cancellation request (no ownership check, the
/// caller has already resolved authority).
pub async fn cancel_for_request(pool: &SqlitePool, id: i64) -> RepoResult<Booking> {
    let booking = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Booking {id} not found")))?;
    if booking.status == BookingStatus::Cancelled {
        return Err(RepoError::InvalidState("Booking is already cancelled".into()));
    }
    set_status(pool, id, BookingStatus::Cancelled).await?;
    require(pool, id).await
}

pub async fn set_status(pool: &SqlitePool, id: i64, status: BookingStatus) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE booking SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Booking {id} not found")));
    }
    Ok(())
}

pub async fn set_payment_status(
    pool: &SqlitePool,
    id: i64,
    payment_status: PaymentStatus,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE booking SET payment_status = ?, updated_at = ? WHERE id = ?")
        .bind(payment_status)
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Booking {id} not found")));
    }
    Ok(())
}

/// Active bookings of one hotel (cancelled rows excluded), staff view
pub async fn find_views_for_hotel(
    pool: &SqlitePool,
    hotel_id: i64,
) -> RepoResult<Vec<BookingView>> {
    let views = sqlx::query_as::<_, BookingView>(&format!(
        "{VIEW_SELECT} WHERE b.hotel_id = ? AND b.status != ? ORDER BY b.created_at DESC"
    ))
    .bind(hotel_id)
    .bind(BookingStatus::Cancelled)
    .fetch_all(pool)
    .await?;
    Ok(views)
}

/// Every booking across hotels, newest first (owner view)
pub async fn find_all_views(
    pool: &SqlitePool,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<BookingView>> {
    let views = sqlx::query_as::<_, BookingView>(&format!(
        "{VIEW_SELECT} ORDER BY b.created_at DESC LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(views)
}

pub async fn count_all(pool: &SqlitePool) -> RepoResult<i64> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM booking")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

/// View of one booking plus the manager id of its hotel, which the
/// record-level access check needs.
pub struct BookingViewWithManager {
    pub view: BookingView,
    pub hotel_manager_id: Option<i64>,
}

pub async fn find_view_by_id(
    pool: &SqlitePool,
    id: i64,
) -> RepoResult<Option<BookingViewWithManager>> {
    #[derive(sqlx::FromRow)]
    struct Row {
        #[sqlx(flatten)]
        view: BookingView,
        hotel_manager_id: Option<i64>,
    }

    let row = sqlx::query_as::<_, Row>(
        "SELECT g.name AS guest_name, g.email AS guest_email, \
           r.room_number, r.room_type, r.availability AS room_availability, r.floor, \
           h.name AS hotel_name, m.name AS manager_name, \
           b.check_in_date, b.number_of_days, b.total_price, b.adults, b.children, \
           h.manager_id AS hotel_manager_id \
         FROM booking b \
         JOIN guest g ON g.id = b.user_id \
         JOIN room r ON r.id = b.room_id \
         JOIN hotel h ON h.id = b.hotel_id \
         LEFT JOIN staff m ON m.id = h.manager_id \
         WHERE b.id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| BookingViewWithManager {
        view: r.view,
        hotel_manager_id: r.hotel_manager_id,
    }))
}

async fn require(pool: &SqlitePool, id: i64) -> RepoResult<Booking> {
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Booking {id} not found")))
}
