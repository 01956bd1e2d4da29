//! Hotel Repository
//!
//! Directory of hotels plus the roster table that backs the access
//! scope resolver. The roster's `staff_id` primary key is what makes
//! "a staff member belongs to at most one hotel" a real constraint.

use super::{RepoError, RepoResult};
use shared::models::{Hotel, HotelCreate, HotelUpdate, ImageRef};
use sqlx::SqlitePool;
use sqlx::types::Json;

const COLUMNS: &str = "id, name, location, description, images, rating, price_per_night, amenities, manager_id, created_by, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Hotel>> {
    let hotel = sqlx::query_as::<_, Hotel>(&format!("SELECT {COLUMNS} FROM hotel WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(hotel)
}

pub async fn find_all(pool: &SqlitePool, limit: i64, offset: i64) -> RepoResult<Vec<Hotel>> {
    let hotels = sqlx::query_as::<_, Hotel>(&format!(
        "SELECT {COLUMNS} FROM hotel ORDER BY created_at DESC LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(hotels)
}

pub async fn count_all(pool: &SqlitePool) -> RepoResult<i64> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM hotel")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

/// Hotel managed by the given staff member (manager lookup rule)
pub async fn find_by_manager(pool: &SqlitePool, manager_id: i64) -> RepoResult<Option<Hotel>> {
    let hotel =
        sqlx::query_as::<_, Hotel>(&format!("SELECT {COLUMNS} FROM hotel WHERE manager_id = ?"))
            .bind(manager_id)
            .fetch_optional(pool)
            .await?;
    Ok(hotel)
}

/// Hotel whose roster contains the given staff member
/// (receptionist/cleaner lookup rule)
pub async fn find_by_roster(pool: &SqlitePool, staff_id: i64) -> RepoResult<Option<Hotel>> {
    let hotel = sqlx::query_as::<_, Hotel>(&format!(
        "SELECT h.{} FROM hotel h JOIN hotel_staff hs ON hs.hotel_id = h.id WHERE hs.staff_id = ?",
        COLUMNS.replace(", ", ", h.")
    ))
    .bind(staff_id)
    .fetch_optional(pool)
    .await?;
    Ok(hotel)
}

pub async fn create(pool: &SqlitePool, data: HotelCreate, created_by: i64) -> RepoResult<Hotel> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();

    sqlx::query(
        "INSERT INTO hotel (id, name, location, description, images, rating, price_per_night, amenities, created_by, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.location)
    .bind(&data.description)
    .bind(Json(&data.images))
    .bind(data.rating)
    .bind(data.price_per_night)
    .bind(Json(&data.amenities))
    .bind(created_by)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create hotel".into()))
}

/// Partial update; `images` replacement is decided by the caller (old
/// blobs must be destroyed before the new set is written).
pub async fn update(pool: &SqlitePool, id: i64, data: HotelUpdate) -> RepoResult<Hotel> {
    let now = shared::util::now_millis();

    let rows = sqlx::query(
        "UPDATE hotel SET \
           name = COALESCE(?1, name), \
           location = COALESCE(?2, location), \
           description = COALESCE(?3, description), \
           rating = COALESCE(?4, rating), \
           price_per_night = COALESCE(?5, price_per_night), \
           amenities = COALESCE(?6, amenities), \
           images = COALESCE(?7, images), \
           updated_at = ?8 \
         WHERE id = ?9",
    )
    .bind(&data.name)
    .bind(&data.location)
    .bind(&data.description)
    .bind(data.rating)
    .bind(data.price_per_night)
    .bind(data.amenities.as_ref().map(Json))
    .bind(data.images.as_ref().map(Json))
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Hotel {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Hotel {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    sqlx::query("DELETE FROM hotel_staff WHERE hotel_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    let rows = sqlx::query("DELETE FROM hotel WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Hotel {id} not found")));
    }
    Ok(())
}

pub async fn assign_manager(pool: &SqlitePool, id: i64, staff_id: i64) -> RepoResult<Hotel> {
    let rows = sqlx::query("UPDATE hotel SET manager_id = ?, updated_at = ? WHERE id = ?")
        .bind(staff_id)
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Hotel {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Hotel {id} not found")))
}

/// Add a staff member to the roster. The `staff_id` primary key turns
/// a second assignment into a Duplicate error.
pub async fn add_staff(pool: &SqlitePool, id: i64, staff_id: i64) -> RepoResult<()> {
    sqlx::query("INSERT INTO hotel_staff (staff_id, hotel_id) VALUES (?, ?)")
        .bind(staff_id)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| match RepoError::from(e) {
            RepoError::Duplicate(_) => {
                RepoError::Duplicate("Staff member is already assigned to a hotel".into())
            }
            other => other,
        })?;
    Ok(())
}

pub async fn remove_staff(pool: &SqlitePool, id: i64, staff_id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM hotel_staff WHERE hotel_id = ? AND staff_id = ?")
        .bind(id)
        .bind(staff_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Staff {staff_id} is not on the roster of hotel {id}"
        )));
    }
    Ok(())
}

/// Roster staff ids of a hotel
pub async fn roster(pool: &SqlitePool, id: i64) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>("SELECT staff_id FROM hotel_staff WHERE hotel_id = ?")
        .bind(id)
        .fetch_all(pool)
        .await?;
    Ok(ids)
}

/// Replace the stored image set (caller destroys old blobs first)
pub async fn set_images(pool: &SqlitePool, id: i64, images: &[ImageRef]) -> RepoResult<()> {
    sqlx::query("UPDATE hotel SET images = ?, updated_at = ? WHERE id = ?")
        .bind(Json(images))
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
