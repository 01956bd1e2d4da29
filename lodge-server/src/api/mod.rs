//! HTTP API 模块
//!
//! 每个子模块一个资源: `mod.rs` 注册路由，`handler.rs` 实现处理函数。

pub mod auth;
pub mod bookings;
pub mod health;
pub mod hotels;
pub mod payments;
pub mod rooms;
pub mod upload;
