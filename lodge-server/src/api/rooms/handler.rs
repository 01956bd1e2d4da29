//! Room API Handlers
//!
//! 公开目录 + 按角色划分的客房操作。经理和前台的操作都先经过
//! 酒店范围解析，跨酒店的客房一律回答 NotFound。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{
    ReservationStatus, Role, Room, RoomCreate, RoomToClean, RoomTools, RoomUpdate,
};

use crate::auth::{CurrentUser, resolve_scope};
use crate::core::ServerState;
use crate::db::repository::{hotel, page_window, room, total_pages};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message, validation};

#[derive(Deserialize)]
pub struct RoomListQuery {
    pub status: Option<ReservationStatus>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Serialize)]
pub struct RoomPage {
    pub rooms: Vec<Room>,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// GET /api/room - 客房目录 (公开, 可按预订状态过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<RoomListQuery>,
) -> AppResult<Json<AppResponse<RoomPage>>> {
    let (page, limit, offset) = page_window(query.page, query.limit);
    let rooms = room::find_all(&state.pool, query.status, limit, offset).await?;
    let total = room::count_all(&state.pool, query.status).await?;

    Ok(ok(RoomPage {
        rooms,
        page,
        limit,
        total_pages: total_pages(total, limit),
    }))
}

/// Resolve a room the staff caller may manage. The owner reaches any
/// room; a manager only rooms of their own hotel.
async fn managed_room(state: &ServerState, user: &CurrentUser, id: i64) -> AppResult<Room> {
    let found = match user.role {
        Role::Owner => room::find_by_id(&state.pool, id).await?,
        _ => {
            let scope = resolve_scope(&state.pool, user).await?;
            room::find_by_id_in_hotel(&state.pool, id, scope.hotel_id()?).await?
        }
    };
    found.ok_or_else(|| AppError::not_found(format!("Room {id} not found")))
}

fn validate_room_create(data: &RoomCreate) -> AppResult<()> {
    validation::validate_required_text(
        &data.room_number,
        "room_number",
        validation::MAX_SHORT_TEXT_LEN,
    )?;
    validation::validate_required_text(&data.room_type, "room_type", validation::MAX_NAME_LEN)?;
    validation::validate_required_text(&data.description, "description", validation::MAX_NOTE_LEN)?;
    validation::validate_non_negative(data.price_per_night, "price_per_night")?;
    validation::validate_non_negative(data.discounts, "discounts")?;
    validation::validate_non_negative(data.max_occupancy, "max_occupancy")?;
    if data.images.is_empty() {
        return Err(AppError::validation("At least one room image is required"));
    }
    Ok(())
}

/// POST /api/room/hotel/{hotel_id} - 创建客房 (业主/经理)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(hotel_id): Path<i64>,
    Json(payload): Json<RoomCreate>,
) -> AppResult<Json<AppResponse<Room>>> {
    validate_room_create(&payload)?;

    // 经理只能向自己的酒店加房
    if user.role == Role::Manager {
        let scope = resolve_scope(&state.pool, &user).await?;
        if scope.hotel_id()? != hotel_id {
            return Err(AppError::not_found(format!("Hotel {hotel_id} not found")));
        }
    } else {
        hotel::find_by_id(&state.pool, hotel_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Hotel {hotel_id} not found")))?;
    }

    let created = room::create(&state.pool, hotel_id, payload).await?;
    Ok(ok(created))
}

/// GET /api/room/hotel/{hotel_id} - 酒店的客房列表 (业主/经理)
pub async fn list_by_hotel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(hotel_id): Path<i64>,
    Query(query): Query<RoomListQuery>,
) -> AppResult<Json<AppResponse<RoomPage>>> {
    if user.role == Role::Manager {
        let scope = resolve_scope(&state.pool, &user).await?;
        if scope.hotel_id()? != hotel_id {
            return Err(AppError::not_found(format!("Hotel {hotel_id} not found")));
        }
    }

    let (page, limit, offset) = page_window(query.page, query.limit);
    let rooms = room::find_by_hotel(&state.pool, hotel_id, limit, offset).await?;
    let total = room::count_by_hotel(&state.pool, hotel_id).await?;

    Ok(ok(RoomPage {
        rooms,
        page,
        limit,
        total_pages: total_pages(total, limit),
    }))
}

/// PATCH /api/room/{id} - 更新客房 (业主/经理)
///
/// 请求携带新图片集时，旧图片从存储中销毁。
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<RoomUpdate>,
) -> AppResult<Json<AppResponse<Room>>> {
    validation::validate_optional_text(
        &payload.room_number,
        "room_number",
        validation::MAX_SHORT_TEXT_LEN,
    )?;
    validation::validate_optional_text(
        &payload.description,
        "description",
        validation::MAX_NOTE_LEN,
    )?;
    if let Some(price) = payload.price_per_night {
        validation::validate_non_negative(price, "price_per_night")?;
    }

    let existing = managed_room(&state, &user, id).await?;

    if payload.images.is_some()
        && !existing.images.0.is_empty()
        && let Err(e) = state.images.destroy_all(&existing.images.0).await
    {
        tracing::warn!(room_id = id, error = %e, "Failed to destroy replaced room images");
    }

    let updated = room::update(&state.pool, id, payload).await?;
    Ok(ok(updated))
}

/// DELETE /api/room/{id} - 删除客房 (业主/经理)
///
/// 已确认预订的客房拒绝删除 (422)。
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    managed_room(&state, &user, id).await?;

    let deleted = room::delete(&state.pool, id).await?;

    if !deleted.images.0.is_empty()
        && let Err(e) = state.images.destroy_all(&deleted.images.0).await
    {
        tracing::warn!(room_id = id, error = %e, "Failed to destroy room images");
    }

    Ok(ok_with_message((), "Room deleted"))
}

/// 前台工具共用: 范围内查房
async fn scoped_room(state: &ServerState, user: &CurrentUser, id: i64) -> AppResult<Room> {
    let scope = resolve_scope(&state.pool, user).await?;
    room::find_by_id_in_hotel(&state.pool, id, scope.hotel_id()?)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Room {id} not found")))
}

/// PATCH /api/room/tools/status/{id} - 修改预订状态 (经理/前台)
pub async fn set_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<RoomTools>,
) -> AppResult<Json<AppResponse<Room>>> {
    let status = payload
        .status
        .ok_or_else(|| AppError::validation("status is required"))?;
    scoped_room(&state, &user, id).await?;
    let updated = room::set_status(&state.pool, id, status).await?;
    Ok(ok(updated))
}

/// PATCH /api/room/tools/description/{id} - 修改描述 (经理/前台)
pub async fn set_description(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<RoomTools>,
) -> AppResult<Json<AppResponse<Room>>> {
    let description = payload
        .description
        .ok_or_else(|| AppError::validation("description is required"))?;
    validation::validate_required_text(&description, "description", validation::MAX_NOTE_LEN)?;
    scoped_room(&state, &user, id).await?;
    let updated = room::set_description(&state.pool, id, &description).await?;
    Ok(ok(updated))
}

/// PATCH /api/room/tools/discounts/{id} - 修改折扣 (经理/前台)
pub async fn set_discounts(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<RoomTools>,
) -> AppResult<Json<AppResponse<Room>>> {
    let discounts = payload
        .discounts
        .ok_or_else(|| AppError::validation("discounts is required"))?;
    validation::validate_non_negative(discounts, "discounts")?;
    scoped_room(&state, &user, id).await?;
    let updated = room::set_discounts(&state.pool, id, discounts).await?;
    Ok(ok(updated))
}

/// PATCH /api/room/tools/amenities/{id} - 修改设施列表 (经理/前台)
pub async fn set_amenities(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<RoomTools>,
) -> AppResult<Json<AppResponse<Room>>> {
    let amenities = payload
        .amenities
        .ok_or_else(|| AppError::validation("amenities is required"))?;
    scoped_room(&state, &user, id).await?;
    let updated = room::set_amenities(&state.pool, id, &amenities).await?;
    Ok(ok(updated))
}

/// GET /api/room/clean - 待打扫列表 (清洁工)
pub async fn cleaning_list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<RoomToClean>>>> {
    let scope = resolve_scope(&state.pool, &user).await?;
    let rooms = room::find_needing_cleaning(&state.pool, scope.hotel_id()?).await?;
    Ok(ok(rooms))
}

/// PATCH /api/room/clean/{id} - 标记客房就绪 (清洁工)
pub async fn mark_cleaned(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Room>>> {
    scoped_room(&state, &user, id).await?;
    let updated = room::set_available(&state.pool, id).await?;
    Ok(ok(updated))
}

/// POST /api/room/checkout/{id} - 客户退房
///
/// 仅对可用客房生效: 置为不可用、写退房时间、更新预订状态。
pub async fn checkout(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<RoomTools>,
) -> AppResult<Json<AppResponse<Room>>> {
    let status = payload.status.unwrap_or(ReservationStatus::Pending);
    let updated = room::checkout(&state.pool, id, status).await?;
    Ok(ok(updated))
}
