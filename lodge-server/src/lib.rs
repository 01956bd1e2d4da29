//! Lodge Server - 多酒店预订与库存管理后端
//!
//! # 架构概述
//!
//! - **认证** (`auth`): JWT + Argon2 认证，角色授权与酒店范围解析
//! - **数据库** (`db`): 嵌入式 SQLite 存储 (sqlx, WAL)
//! - **HTTP API** (`api`): RESTful API 接口
//! - **外部服务** (`services`): 支付网关、通知、图片存储
//!
//! # 模块结构
//!
//! ```text
//! lodge-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、角色、范围
//! ├── services/      # 网关、通知、图片
//! ├── api/           # HTTP 路由和处理器
//! ├── routes/        # 路由装配与中间件栈
//! ├── utils/         # 错误、日志、校验
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod routes;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    __              __
   / /   ____  ____/ /___ ____
  / /   / __ \/ __  / __ `/ _ \
 / /___/ /_/ / /_/ / /_/ /  __/
/_____/\____/\__,_/\__, /\___/
                  /____/
    "#
    );
}
