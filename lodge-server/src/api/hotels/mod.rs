//! Hotel API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};
use shared::models::Role;

use crate::auth::require_roles;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/hotel", routes())
}

fn routes() -> Router<ServerState> {
    // 公开目录读取 (中间件放行)
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    // 业主管理: 酒店 CRUD 与花名册
    let owner_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", patch(handler::update).delete(handler::delete))
        .route("/{id}/manager", post(handler::assign_manager))
        .route("/{id}/staff", get(handler::roster).post(handler::add_staff))
        .route("/{id}/staff/{staff_id}", delete(handler::remove_staff))
        .layer(middleware::from_fn(require_roles(&[Role::Owner])));

    read_routes.merge(owner_routes)
}
