//! Booking API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use shared::models::Role;

use crate::auth::require_roles;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/booking", routes())
}

fn routes() -> Router<ServerState> {
    // 客户: 下单与取消
    let customer_routes = Router::new()
        .route("/create/{room_id}", post(handler::create))
        .route("/cancel/{id}", patch(handler::cancel))
        .layer(middleware::from_fn(require_roles(&[Role::Customer])));

    // 经理/前台: 本酒店的活动预订
    let staff_routes = Router::new()
        .route("/", get(handler::list_for_hotel))
        .layer(middleware::from_fn(require_roles(&[
            Role::Manager,
            Role::Receptionist,
        ])));

    // 业主: 全量预订
    let owner_routes = Router::new()
        .route("/owner/all", get(handler::list_all))
        .layer(middleware::from_fn(require_roles(&[Role::Owner])));

    // 记录级访问检查在 handler 内完成
    let record_routes = Router::new().route("/{id}", get(handler::get_by_id));

    customer_routes
        .merge(staff_routes)
        .merge(owner_routes)
        .merge(record_routes)
}
