//! Payment API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use shared::models::Role;

use crate::auth::require_roles;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/payment", routes())
}

fn routes() -> Router<ServerState> {
    // 客户: 结账与取消申请
    let customer_routes = Router::new()
        .route("/checkout/{method}/{booking_id}", post(handler::checkout))
        .route(
            "/request-cancellation/{booking_id}",
            post(handler::request_cancellation),
        )
        .layer(middleware::from_fn(require_roles(&[Role::Customer])));

    // 业主: 全量账单与累计营收
    let owner_routes = Router::new()
        .route("/owner/payments", get(handler::list_all))
        .route("/totalAmount", get(handler::total_amount))
        .layer(middleware::from_fn(require_roles(&[Role::Owner])));

    // 经理/前台: 本酒店账单
    let staff_routes = Router::new()
        .route("/staff/payments", get(handler::list_for_hotel))
        .layer(middleware::from_fn(require_roles(&[
            Role::Manager,
            Role::Receptionist,
        ])));

    customer_routes.merge(owner_routes).merge(staff_routes)
}
