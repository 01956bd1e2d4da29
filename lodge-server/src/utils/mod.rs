//! 工具模块
//!
//! - [`error`] - 统一错误类型与响应
//! - [`result`] - Result 别名
//! - [`logger`] - 日志初始化
//! - [`validation`] - 输入校验

pub mod error;
pub mod logger;
pub mod result;
pub mod validation;

pub use error::{AppError, AppResponse, ok, ok_with_message};
pub use result::AppResult;
