//! 认证与授权模块
//!
//! JWT 令牌服务、认证中间件、角色检查和酒店范围解析。

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod roles;
pub mod scope;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_roles};
pub use scope::{StaffScope, can_view_booking, resolve_scope};
