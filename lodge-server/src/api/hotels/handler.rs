//! Hotel API Handlers
//!
//! 公开目录读取 + 业主管理 (CRUD、经理指派、花名册)。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{Hotel, HotelCreate, HotelUpdate, Role, StaffAssign};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{hotel, page_window, staff, total_pages};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message, validation};

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Serialize)]
pub struct HotelPage {
    pub hotels: Vec<Hotel>,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// GET /api/hotel - 酒店目录 (公开, 分页)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<AppResponse<HotelPage>>> {
    let (page, limit, offset) = page_window(query.page, query.limit);
    let hotels = hotel::find_all(&state.pool, limit, offset).await?;
    let total = hotel::count_all(&state.pool).await?;

    Ok(ok(HotelPage {
        hotels,
        page,
        limit,
        total_pages: total_pages(total, limit),
    }))
}

/// GET /api/hotel/{id} - 单个酒店 (公开)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Hotel>>> {
    let found = hotel::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Hotel {id} not found")))?;
    Ok(ok(found))
}

fn validate_hotel_create(data: &HotelCreate) -> AppResult<()> {
    validation::validate_required_text(&data.name, "name", validation::MAX_NAME_LEN)?;
    validation::validate_required_text(&data.location, "location", validation::MAX_NAME_LEN)?;
    validation::validate_optional_text(&data.description, "description", validation::MAX_NOTE_LEN)?;
    validation::validate_non_negative(data.price_per_night, "price_per_night")?;
    if !(0.0..=5.0).contains(&data.rating) {
        return Err(AppError::validation("rating must be between 0 and 5"));
    }
    Ok(())
}

/// POST /api/hotel - 创建酒店 (仅业主)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<HotelCreate>,
) -> AppResult<Json<AppResponse<Hotel>>> {
    validate_hotel_create(&payload)?;
    let created = hotel::create(&state.pool, payload, user.id).await?;
    Ok(ok(created))
}

/// PATCH /api/hotel/{id} - 更新酒店 (仅业主)
///
/// 只有建档的业主本人可以更新。请求携带新图片集时，旧图片从存储
/// 中销毁。
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<HotelUpdate>,
) -> AppResult<Json<AppResponse<Hotel>>> {
    validation::validate_optional_text(&payload.name, "name", validation::MAX_NAME_LEN)?;
    validation::validate_optional_text(&payload.location, "location", validation::MAX_NAME_LEN)?;
    validation::validate_optional_text(
        &payload.description,
        "description",
        validation::MAX_NOTE_LEN,
    )?;
    if let Some(price) = payload.price_per_night {
        validation::validate_non_negative(price, "price_per_night")?;
    }

    let existing = hotel::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Hotel {id} not found")))?;

    if existing.created_by != Some(user.id) {
        return Err(AppError::forbidden(
            "You don't have permission to update this hotel",
        ));
    }

    if payload.images.is_some()
        && !existing.images.0.is_empty()
        && let Err(e) = state.images.destroy_all(&existing.images.0).await
    {
        tracing::warn!(hotel_id = id, error = %e, "Failed to destroy replaced hotel images");
    }

    let updated = hotel::update(&state.pool, id, payload).await?;
    Ok(ok(updated))
}

/// DELETE /api/hotel/{id} - 删除酒店 (仅业主)
///
/// 没有建档人的酒店拒绝删除。图片随记录一并销毁，部分失败只记日志。
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    let existing = hotel::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Hotel {id} not found")))?;

    if existing.created_by.is_none() {
        return Err(AppError::forbidden("Hotel doesn't have a creator"));
    }

    hotel::delete(&state.pool, id).await?;

    if !existing.images.0.is_empty()
        && let Err(e) = state.images.destroy_all(&existing.images.0).await
    {
        tracing::warn!(hotel_id = id, error = %e, "Failed to destroy hotel images");
    }

    Ok(ok_with_message((), "Hotel deleted"))
}

/// POST /api/hotel/{id}/manager - 指派经理 (仅业主)
///
/// 被指派者必须是 Manager 角色的员工账户。
pub async fn assign_manager(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StaffAssign>,
) -> AppResult<Json<AppResponse<Hotel>>> {
    let member = staff::find_by_id(&state.pool, payload.staff_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Staff {} not found", payload.staff_id)))?;
    if member.role != Role::Manager {
        return Err(AppError::validation(format!(
            "Staff {} is not a manager",
            payload.staff_id
        )));
    }

    let updated = hotel::assign_manager(&state.pool, id, payload.staff_id).await?;
    Ok(ok(updated))
}

/// GET /api/hotel/{id}/staff - 花名册 (仅业主)
pub async fn roster(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Vec<i64>>>> {
    hotel::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Hotel {id} not found")))?;
    let ids = hotel::roster(&state.pool, id).await?;
    Ok(ok(ids))
}

/// POST /api/hotel/{id}/staff - 加入花名册 (仅业主)
///
/// 一名员工只能属于一家酒店，重复指派返回 409。
pub async fn add_staff(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StaffAssign>,
) -> AppResult<Json<AppResponse<()>>> {
    hotel::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Hotel {id} not found")))?;
    let member = staff::find_by_id(&state.pool, payload.staff_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Staff {} not found", payload.staff_id)))?;
    if member.role == Role::Customer || member.role == Role::Owner {
        return Err(AppError::validation(
            "Only hotel staff can join a roster",
        ));
    }

    hotel::add_staff(&state.pool, id, payload.staff_id).await?;
    Ok(ok_with_message((), "Staff added to hotel"))
}

/// DELETE /api/hotel/{id}/staff/{staff_id} - 移出花名册 (仅业主)
pub async fn remove_staff(
    State(state): State<ServerState>,
    Path((id, staff_id)): Path<(i64, i64)>,
) -> AppResult<Json<AppResponse<()>>> {
    hotel::remove_staff(&state.pool, id, staff_id).await?;
    Ok(ok_with_message((), "Staff removed from hotel"))
}
