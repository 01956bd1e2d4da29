//! Auth API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use shared::models::Role;

use crate::auth::require_roles;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    // 公开入口 (中间件放行)
    let public_routes = Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .route("/staff/login", post(handler::staff_login));

    // 登录后通用
    let account_routes = Router::new()
        .route("/me", get(handler::me))
        .route("/change-password", post(handler::change_password))
        .route("/logout", post(handler::logout));

    // 员工账户创建: 仅业主
    let owner_routes = Router::new()
        .route("/staff", post(handler::create_staff))
        .layer(middleware::from_fn(require_roles(&[Role::Owner])));

    public_routes.merge(account_routes).merge(owner_routes)
}
