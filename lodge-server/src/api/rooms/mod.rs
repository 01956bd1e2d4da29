//! Room API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use shared::models::Role;

use crate::auth::require_roles;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/room", routes())
}

fn routes() -> Router<ServerState> {
    // 公开目录读取 (中间件放行)
    let read_routes = Router::new().route("/", get(handler::list));

    // 业主/经理: 客房 CRUD (经理限自己酒店)
    let manage_routes = Router::new()
        .route(
            "/hotel/{hotel_id}",
            get(handler::list_by_hotel).post(handler::create),
        )
        .route("/{id}", patch(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_roles(&[
            Role::Owner,
            Role::Manager,
        ])));

    // 前台工具: 单字段修改
    let tools_routes = Router::new()
        .route("/tools/status/{id}", patch(handler::set_status))
        .route("/tools/description/{id}", patch(handler::set_description))
        .route("/tools/discounts/{id}", patch(handler::set_discounts))
        .route("/tools/amenities/{id}", patch(handler::set_amenities))
        .layer(middleware::from_fn(require_roles(&[
            Role::Manager,
            Role::Receptionist,
        ])));

    // 清洁工: 待打扫列表与标记就绪
    let cleaner_routes = Router::new()
        .route("/clean", get(handler::cleaning_list))
        .route("/clean/{id}", patch(handler::mark_cleaned))
        .layer(middleware::from_fn(require_roles(&[Role::Cleaner])));

    // 客户退房
    let customer_routes = Router::new()
        .route("/checkout/{id}", post(handler::checkout))
        .layer(middleware::from_fn(require_roles(&[Role::Customer])));

    read_routes
        .merge(manage_routes)
        .merge(tools_routes)
        .merge(cleaner_routes)
        .merge(customer_routes)
}
