//! Payment API Handlers
//!
//! 结账把预订总价换算成最小货币单位 (×100) 后交给网关。每次扣款
//! 尝试都落一行支付记录，包括失败的那些；只有成功的扣款会进入
//! 客户的支付历史并把预订标记为已支付。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{
    BookingStatus, Payment, PaymentMethod, PaymentState, PaymentStatus,
};

use crate::auth::{CurrentUser, resolve_scope};
use crate::core::ServerState;
use crate::db::repository::{
    booking, guest, page_window,
    payment::{self, NewPayment},
    total_pages,
};
use crate::security_log;
use crate::services::{ChargeStatus, GatewayError, PaymentConfirmation, email_status};
use crate::utils::{AppError, AppResponse, AppResult, ok};

#[derive(Deserialize)]
pub struct CheckoutRequest {
    /// 客户端预先取得的支付凭证 (现金结账可省略)
    pub source: Option<String>,
}

#[derive(Serialize)]
pub struct CheckoutResponse {
    pub payment: Payment,
    pub email_status: &'static str,
}

#[derive(Serialize)]
pub struct PaymentPage {
    pub payments: Vec<Payment>,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

#[derive(Serialize)]
pub struct TotalAmount {
    /// 最小货币单位
    pub total_amount: i64,
}

fn parse_method(raw: &str) -> AppResult<PaymentMethod> {
    match raw.to_ascii_lowercase().as_str() {
        "online" => Ok(PaymentMethod::Online),
        "cash" => Ok(PaymentMethod::Cash),
        other => Err(AppError::validation(format!(
            "Unknown payment method '{other}'"
        ))),
    }
}

/// POST /api/payment/checkout/{method}/{booking_id} - 结账 (客户)
pub async fn checkout(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((method, booking_id)): Path<(String, i64)>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<AppResponse<CheckoutResponse>>> {
    let method = parse_method(&method)?;

    let record = booking::find_by_id(&state.pool, booking_id)
        .await?
        .filter(|b| b.user_id == user.id)
        .ok_or_else(|| AppError::not_found(format!("Booking {booking_id} not found")))?;

    if record.payment_status == PaymentStatus::Paid {
        return Err(AppError::invalid_state("Booking is already paid"));
    }
    if record.status == BookingStatus::Cancelled {
        return Err(AppError::invalid_state("Booking is cancelled"));
    }

    // 预订总价是主货币单位，网关按最小单位扣款
    let amount = record.total_price * 100;

    let charge = match method {
        PaymentMethod::Cash => crate::services::Charge {
            transaction_id: format!("cash_{}", uuid::Uuid::new_v4().simple()),
            status: ChargeStatus::Succeeded,
        },
        PaymentMethod::Online => {
            let source = payload
                .source
                .as_deref()
                .ok_or_else(|| AppError::validation("source is required for online payment"))?;

            match state.gateway.charge(amount, "usd", source).await {
                Ok(charge) => charge,
                Err(e) => {
                    // 拒付也落账: 失败记录 + 预订标记支付失败
                    let failed = payment::create(
                        &state.pool,
                        NewPayment {
                            hotel_id: record.hotel_id,
                            room_id: record.room_id,
                            booking_id,
                            payment_method: method,
                            amount,
                            transaction_id: format!(
                                "declined_{}",
                                uuid::Uuid::new_v4().simple()
                            ),
                            status: PaymentState::Failed,
                        },
                    )
                    .await?;
                    booking::set_payment_status(&state.pool, booking_id, PaymentStatus::Failed)
                        .await?;

                    security_log!(
                        "WARN",
                        "payment_declined",
                        payment_id = failed.id,
                        booking_id = booking_id,
                        error = e.to_string()
                    );
                    return Err(match e {
                        GatewayError::CardDeclined(msg) => AppError::payment_rejected(msg),
                        GatewayError::Unavailable(msg) => AppError::internal(msg),
                    });
                }
            }
        }
    };

    let (stored_state, payment_status) = match charge.status {
        // 网关的 "succeeded" 在账面上记为 Completed
        ChargeStatus::Succeeded => (PaymentState::Completed, PaymentStatus::Paid),
        ChargeStatus::Failed => (PaymentState::Failed, PaymentStatus::Failed),
    };

    let row = payment::create(
        &state.pool,
        NewPayment {
            hotel_id: record.hotel_id,
            room_id: record.room_id,
            booking_id,
            payment_method: method,
            amount,
            transaction_id: charge.transaction_id.clone(),
            status: stored_state,
        },
    )
    .await?;

    guest::append_payment(&state.pool, user.id, row.id).await?;
    booking::set_payment_status(&state.pool, booking_id, payment_status).await?;

    if payment_status == PaymentStatus::Paid {
        booking::set_status(&state.pool, booking_id, BookingStatus::Confirmed).await?;
    }

    let sent = if payment_status == PaymentStatus::Paid {
        state
            .notifier
            .send_payment_confirmation(
                &user.email,
                &user.name,
                &PaymentConfirmation {
                    transaction_id: charge.transaction_id,
                    amount,
                },
            )
            .await
    } else {
        Ok(())
    };

    Ok(ok(CheckoutResponse {
        payment: row,
        email_status: email_status(&sent),
    }))
}

/// POST /api/payment/request-cancellation/{booking_id} - 取消申请 (客户)
///
/// 已支付的预订拒绝取消 (403)，其余直接取消。只改预订状态，不动客房。
pub async fn request_cancellation(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(booking_id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    let record = booking::find_by_id(&state.pool, booking_id)
        .await?
        .filter(|b| b.user_id == user.id)
        .ok_or_else(|| AppError::not_found(format!("Booking {booking_id} not found")))?;

    if record.payment_status == PaymentStatus::Paid {
        return Err(AppError::forbidden(
            "Cannot cancel a paid booking, please contact support!",
        ));
    }

    booking::cancel_for_request(&state.pool, booking_id).await?;

    Ok(crate::utils::ok_with_message((), "Booking cancelled"))
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/payment/owner/payments - 全量账单 (业主, 分页)
///
/// 没有任何支付记录时返回 404。
pub async fn list_all(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<AppResponse<PaymentPage>>> {
    let (page, limit, offset) = page_window(query.page, query.limit);
    let payments = payment::find_page(&state.pool, limit, offset).await?;
    if payments.is_empty() {
        return Err(AppError::not_found("No payments found"));
    }
    let total = payment::count_all(&state.pool).await?;

    Ok(ok(PaymentPage {
        payments,
        page,
        limit,
        total_pages: total_pages(total, limit),
    }))
}

/// GET /api/payment/staff/payments - 本酒店账单 (经理/前台, 分页)
///
/// 本酒店没有支付记录时返回 404。
pub async fn list_for_hotel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<AppResponse<PaymentPage>>> {
    let scope = resolve_scope(&state.pool, &user).await?;
    let hotel_id = scope.hotel_id()?;

    let (page, limit, offset) = page_window(query.page, query.limit);
    let payments = payment::find_by_hotel(&state.pool, hotel_id, limit, offset).await?;
    if payments.is_empty() {
        return Err(AppError::not_found("No payments found"));
    }
    let total = payment::count_by_hotel(&state.pool, hotel_id).await?;

    Ok(ok(PaymentPage {
        payments,
        page,
        limit,
        total_pages: total_pages(total, limit),
    }))
}

/// GET /api/payment/totalAmount - 累计营收 (业主)
///
/// 空账本返回 0。
pub async fn total_amount(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<TotalAmount>>> {
    let total = payment::total_amount(&state.pool).await?;
    Ok(ok(TotalAmount {
        total_amount: total,
    }))
}
