//! Booking API Handlers
//!
//! 下单时以客房当前价计价: 夜数为入住窗口按整天向上取整 (调用方可
//! 直接提供夜数)，总价 = 夜数 × 每晚价。折扣不参与计价。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use shared::models::{Booking, BookingCreate, BookingView, Role};

use crate::auth::{CurrentUser, can_view_booking, resolve_scope};
use crate::core::ServerState;
use crate::db::repository::{
    booking::{self, NewBooking},
    page_window, room, total_pages,
};
use crate::services::{BookingConfirmation, email_status};
use crate::utils::{AppError, AppResponse, AppResult, ok, validation};

#[derive(Serialize)]
pub struct BookingCreated {
    pub booking: Booking,
    pub email_status: &'static str,
}

#[derive(Serialize)]
pub struct BookingPage {
    pub bookings: Vec<BookingView>,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// POST /api/booking/create/{room_id} - 下单 (客户)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(room_id): Path<i64>,
    Json(payload): Json<BookingCreate>,
) -> AppResult<Json<AppResponse<BookingCreated>>> {
    validation::validate_non_negative(payload.guests.adults, "guests.adults")?;
    validation::validate_non_negative(payload.guests.children, "guests.children")?;
    if payload.guests.adults == 0 {
        return Err(AppError::validation("At least one adult guest is required"));
    }
    if let Some(days) = payload.number_of_days
        && days <= 0
    {
        return Err(AppError::validation("number_of_days must be positive"));
    }

    let target = room::find_by_id(&state.pool, room_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Room {room_id} not found")))?;
    if target.price_per_night <= 0 {
        return Err(AppError::not_found("Room price is not available"));
    }

    let check_in = payload.check_in_date.timestamp_millis();
    let check_out = payload.check_out_date.timestamp_millis();
    let days = booking::number_of_days(check_in, check_out, payload.number_of_days);
    let total = booking::total_price(days, target.price_per_night);

    let created = booking::create(
        &state.pool,
        NewBooking {
            user_id: user.id,
            room_id,
            hotel_id: target.hotel_id,
            check_in_date: check_in,
            check_out_date: check_out,
            number_of_days: days,
            total_price: total,
            guests: payload.guests,
        },
    )
    .await?;

    let hotel_name = crate::db::repository::hotel::find_by_id(&state.pool, target.hotel_id)
        .await?
        .map(|h| h.name)
        .unwrap_or_default();

    let sent = state
        .notifier
        .send_booking_confirmation(
            &user.email,
            &user.name,
            &BookingConfirmation {
                hotel_name,
                room_number: target.room_number.clone(),
                check_in_date: check_in,
                number_of_days: days,
                total_price: total,
            },
        )
        .await;

    Ok(ok(BookingCreated {
        booking: created,
        email_status: email_status(&sent),
    }))
}

/// PATCH /api/booking/cancel/{id} - 取消预订 (客户)
///
/// 只能取消自己的预订；重复取消返回 422。只改预订状态，不动客房。
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Booking>>> {
    let cancelled = booking::cancel(&state.pool, id, user.id).await?;
    Ok(ok(cancelled))
}

/// GET /api/booking - 本酒店的活动预订 (经理/前台)
///
/// 已取消的预订不在列表中。
pub async fn list_for_hotel(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<BookingView>>>> {
    let scope = resolve_scope(&state.pool, &user).await?;
    let views = booking::find_views_for_hotel(&state.pool, scope.hotel_id()?).await?;
    Ok(ok(views))
}

#[derive(serde::Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/booking/owner/all - 全部预订 (业主, 分页, 最新在前)
pub async fn list_all(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<AppResponse<BookingPage>>> {
    let (page, limit, offset) = page_window(query.page, query.limit);
    let bookings = booking::find_all_views(&state.pool, limit, offset).await?;
    let total = booking::count_all(&state.pool).await?;

    Ok(ok(BookingPage {
        bookings,
        page,
        limit,
        total_pages: total_pages(total, limit),
    }))
}

/// GET /api/booking/{id} - 单个预订 (员工, 记录级检查)
///
/// 业主任意可见；经理/前台仅当预订所属酒店的 manager_id 是本人。
/// 其余情况一律 NotFound，不泄露记录是否存在。
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<BookingView>>> {
    if user.role == Role::Customer {
        return Err(AppError::not_found(format!("Booking {id} not found")));
    }

    let found = booking::find_view_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))?;

    if !can_view_booking(user.role, user.id, found.hotel_manager_id) {
        return Err(AppError::not_found(format!("Booking {id} not found")));
    }

    Ok(ok(found.view))
}
