//! Room Repository (客房)
//!
//! Carries the record-level inventory guards: a Confirmed room cannot
//! be deleted, and checkout only succeeds while the room is available.

use super::{RepoError, RepoResult};
use shared::models::{ImageRef, ReservationStatus, Room, RoomCreate, RoomToClean, RoomUpdate};
use sqlx::SqlitePool;
use sqlx::types::Json;

const COLUMNS: &str = "id, hotel_id, room_number, room_type, floor, price_per_night, discounts, availability, check_in_date, check_out_date, bed_type, max_occupancy, room_size, bathroom_type, view, smoking_policy, amenities, reservation_status, special_requests, images, description, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Room>> {
    let room = sqlx::query_as::<_, Room>(&format!("SELECT {COLUMNS} FROM room WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(room)
}

/// Lookup constrained to one hotel; the scope filters go through this
/// so a staff member can never reach another hotel's room by id.
pub async fn find_by_id_in_hotel(
    pool: &SqlitePool,
    id: i64,
    hotel_id: i64,
) -> RepoResult<Option<Room>> {
    let room = sqlx::query_as::<_, Room>(&format!(
        "SELECT {COLUMNS} FROM room WHERE id = ? AND hotel_id = ?"
    ))
    .bind(id)
    .bind(hotel_id)
    .fetch_optional(pool)
    .await?;
    Ok(room)
}

/// Public room listing, optionally filtered by reservation status
pub async fn find_all(
    pool: &SqlitePool,
    status: Option<ReservationStatus>,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Room>> {
    let rooms = match status {
        Some(status) => {
            sqlx::query_as::<_, Room>(&format!(
                "SELECT {COLUMNS} FROM room WHERE reservation_status = ? ORDER BY created_at DESC LIMIT ? OFFSET ?"
            ))
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Room>(&format!(
                "SELECT {COLUMNS} FROM room ORDER BY created_at DESC LIMIT ? OFFSET ?"
            ))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
    };
    Ok(rooms)
}

pub async fn count_all(pool: &SqlitePool, status: Option<ReservationStatus>) -> RepoResult<i64> {
    let total = match status {
        Some(status) => {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM room WHERE reservation_status = ?")
                .bind(status)
                .fetch_one(pool)
                .await?
        }
        None => {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM room")
                .fetch_one(pool)
                .await?
        }
    };
    Ok(total)
}

pub async fn find_by_hotel(
    pool: &SqlitePool,
    hotel_id: i64,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Room>> {
    let rooms = sqlx::query_as::<_, Room>(&format!(
        "SELECT {COLUMNS} FROM room WHERE hotel_id = ? ORDER BY created_at DESC LIMIT ? OFFSET ?"
    ))
    .bind(hotel_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(rooms)
}

pub async fn count_by_hotel(pool: &SqlitePool, hotel_id: i64) -> RepoResult<i64> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM room WHERE hotel_id = ?")
        .bind(hotel_id)
        .fetch_one(pool)
        .await?;
    Ok(total)
}

pub async fn create(pool: &SqlitePool, hotel_id: i64, data: RoomCreate) -> RepoResult<Room> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();

    sqlx::query(
        "INSERT INTO room (id, hotel_id, room_number, room_type, floor, price_per_night, discounts, \
           bed_type, max_occupancy, room_size, bathroom_type, view, smoking_policy, amenities, \
           special_requests, images, description, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(hotel_id)
    .bind(&data.room_number)
    .bind(&data.room_type)
    .bind(data.floor)
    .bind(data.price_per_night)
    .bind(data.discounts)
    .bind(&data.bed_type)
    .bind(data.max_occupancy)
    .bind(data.room_size)
    .bind(&data.bathroom_type)
    .bind(&data.view)
    .bind(&data.smoking_policy)
    .bind(Json(&data.amenities))
    .bind(&data.special_requests)
    .bind(Json(&data.images))
    .bind(&data.description)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate(format!(
            "Room number '{}' already exists",
            data.room_number
        )),
        other => other,
    })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create room".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: RoomUpdate) -> RepoResult<Room> {
    let now = shared::util::now_millis();

    let rows = sqlx::query(
        "UPDATE room SET \
           room_number = COALESCE(?1, room_number), \
           room_type = COALESCE(?2, room_type), \
           floor = COALESCE(?3, floor), \
           price_per_night = COALESCE(?4, price_per_night), \
           discounts = COALESCE(?5, discounts), \
           bed_type = COALESCE(?6, bed_type), \
           max_occupancy = COALESCE(?7, max_occupancy), \
           room_size = COALESCE(?8, room_size), \
           bathroom_type = COALESCE(?9, bathroom_type), \
           view = COALESCE(?10, view), \
           smoking_policy = COALESCE(?11, smoking_policy), \
           amenities = COALESCE(?12, amenities), \
           special_requests = COALESCE(?13, special_requests), \
           images = COALESCE(?14, images), \
           description = COALESCE(?15, description), \
           updated_at = ?16 \
         WHERE id = ?17",
    )
    .bind(&data.room_number)
    .bind(&data.room_type)
    .bind(data.floor)
    .bind(data.price_per_night)
    .bind(data.discounts)
    .bind(&data.bed_type)
    .bind(data.max_occupancy)
    .bind(data.room_size)
    .bind(&data.bathroom_type)
    .bind(&data.view)
    .bind(&data.smoking_policy)
    .bind(data.amenities.as_ref().map(Json))
    .bind(&data.special_requests)
    .bind(data.images.as_ref().map(Json))
    .bind(&data.description)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Room {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Room {id} not found")))
}

/// Delete guard: a Confirmed room is occupied and must not vanish.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<Room> {
    let room = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Room {id} not found")))?;

    if room.reservation_status == ReservationStatus::Confirmed {
        return Err(RepoError::InvalidState(
            "Cannot delete a room with a confirmed reservation".into(),
        ));
    }

    sqlx::query("DELETE FROM room WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(room)
}

pub async fn set_status(
    pool: &SqlitePool,
    id: i64,
    status: ReservationStatus,
) -> RepoResult<Room> {
    let rows = sqlx::query("UPDATE room SET reservation_status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Room {id} not found")));
    }
    require(pool, id).await
}

pub async fn set_description(pool: &SqlitePool, id: i64, description: &str) -> RepoResult<Room> {
    single_field_update(pool, id, "description", description.to_string()).await
}

pub async fn set_discounts(pool: &SqlitePool, id: i64, discounts: i64) -> RepoResult<Room> {
    let rows = sqlx::query("UPDATE room SET discounts = ?, updated_at = ? WHERE id = ?")
        .bind(discounts)
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Room {id} not found")));
    }
    require(pool, id).await
}

pub async fn set_amenities(pool: &SqlitePool, id: i64, amenities: &[String]) -> RepoResult<Room> {
    let rows = sqlx::query("UPDATE room SET amenities = ?, updated_at = ? WHERE id = ?")
        .bind(Json(amenities))
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Room {id} not found")));
    }
    require(pool, id).await
}

/// Cleaner marks the room ready again (unconditional)
pub async fn set_available(pool: &SqlitePool, id: i64) -> RepoResult<Room> {
    let rows = sqlx::query("UPDATE room SET availability = 1, updated_at = ? WHERE id = ?")
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Room {id} not found")));
    }
    require(pool, id).await
}

/// Guest checkout. Guarded in SQL: only an available room can be
/// checked out, and the guard and the write are one statement.
pub async fn checkout(
    pool: &SqlitePool,
    id: i64,
    status: ReservationStatus,
) -> RepoResult<Room> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE room SET availability = 0, reservation_status = ?, check_out_date = ?, \
           updated_at = ? WHERE id = ? AND availability = 1",
    )
    .bind(status)
    .bind(now)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        // Distinguish missing from not-available
        return match find_by_id(pool, id).await? {
            Some(_) => Err(RepoError::InvalidState("Room is not available".into())),
            None => Err(RepoError::NotFound(format!("Room {id} not found"))),
        };
    }
    require(pool, id).await
}

/// Cleaning worklist: rooms of the hotel waiting to be turned around
pub async fn find_needing_cleaning(
    pool: &SqlitePool,
    hotel_id: i64,
) -> RepoResult<Vec<RoomToClean>> {
    let rooms = sqlx::query_as::<_, RoomToClean>(
        "SELECT room_number, floor FROM room WHERE hotel_id = ? AND availability = 0 \
         ORDER BY floor, room_number",
    )
    .bind(hotel_id)
    .fetch_all(pool)
    .await?;
    Ok(rooms)
}

async fn require(pool: &SqlitePool, id: i64) -> RepoResult<Room> {
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Room {id} not found")))
}

async fn single_field_update(
    pool: &SqlitePool,
    id: i64,
    column: &str,
    value: String,
) -> RepoResult<Room> {
    let rows = sqlx::query(&format!(
        "UPDATE room SET {column} = ?, updated_at = ? WHERE id = ?"
    ))
    .bind(value)
    .bind(shared::util::now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Room {id} not found")));
    }
    require(pool, id).await
}
