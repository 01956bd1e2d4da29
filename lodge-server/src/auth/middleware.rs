//! 认证中间件
//!
//! 为 JWT 认证和角色授权提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;
use shared::models::Role;

use crate::AppError;
use crate::auth::{CurrentUser, JwtService, roles};
use crate::core::ServerState;
use crate::db::models::{PrincipalKind, token::token_digest};
use crate::db::repository::{guest, staff, token};
use crate::security_log;

/// 公共路由 (跳过认证)
///
/// - 健康检查
/// - 注册和两个登录入口
/// - 酒店目录和客房目录的公开读取
fn is_public(method: &Method, path: &str) -> bool {
    if matches!(
        path,
        "/api/health" | "/api/auth/register" | "/api/auth/login" | "/api/auth/staff/login"
    ) {
        return true;
    }

    if method == Method::GET {
        if path == "/api/hotel" || path == "/api/room" {
            return true;
        }
        // GET /api/hotel/{id} only; deeper hotel paths stay protected
        if let Some(rest) = path.strip_prefix("/api/hotel/")
            && !rest.is_empty()
            && !rest.contains('/')
        {
            return true;
        }
    }

    false
}

/// 认证中间件 - 要求账户登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。签名验证之后
/// 还做三个数据库侧检查：
///
/// 1. 令牌摘要仍在注册表中 (登出/改密码会移除)
/// 2. 账户仍然存在 (按角色查 guest 或 staff 表)
/// 3. 签发之后没有改过密码
///
/// 全部通过后将 [`CurrentUser`] 注入请求扩展。角色以数据库当前值为准。
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 Unauthorized |
/// | 令牌过期 / 改密码后 | 401 TokenExpired |
/// | 无效令牌 / 已吊销 | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证 (让它们正常返回 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let raw_token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    let claims = state.jwt().validate_token(raw_token).map_err(|e| {
        security_log!(
            "WARN",
            "auth_failed",
            error = format!("{}", e),
            uri = format!("{:?}", req.uri())
        );
        match e {
            crate::auth::JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;

    let mut user = CurrentUser::try_from(claims.clone())
        .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {}", e)))?;

    let pool = &state.pool;

    // 令牌注册表检查 (登出即吊销)
    if !token::is_registered(pool, &token_digest(raw_token)).await? {
        security_log!("WARN", "auth_revoked", account_id = user.id);
        return Err(AppError::invalid_token("Token has been revoked"));
    }

    // 账户重查 + 改密码时间检查
    let iat_millis = claims.iat * 1000;
    let password_changed_at = if user.role == Role::Customer {
        let account = guest::find_by_id(pool, user.id)
            .await?
            .ok_or_else(|| AppError::invalid_token("Account no longer exists"))?;
        account.password_changed_at
    } else {
        let account = staff::find_by_id(pool, user.id)
            .await?
            .ok_or_else(|| AppError::invalid_token("Account no longer exists"))?;
        // 角色以数据库为准，令牌里的可能已过时
        user.role = account.role;
        account.password_changed_at
    };

    if let Some(changed_at) = password_changed_at
        && changed_at > iat_millis
    {
        security_log!("WARN", "auth_stale_password", account_id = user.id);
        return Err(AppError::token_expired());
    }

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// 角色检查中间件 - 要求指定角色之一
///
/// # 用法
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/booking", get(handler::list))
///     .layer(middleware::from_fn(require_roles(&[Role::Manager, Role::Receptionist])));
/// ```
///
/// # 错误
///
/// 角色不符返回 403 Forbidden
pub fn require_roles(
    allowed: &'static [Role],
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or(AppError::unauthorized())?;

            if let Err(e) = roles::authorize(user.role, allowed) {
                security_log!(
                    "WARN",
                    "role_denied",
                    account_id = user.id,
                    role = user.role.to_string()
                );
                return Err(e);
            }

            Ok(next.run(req).await)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_routes() {
        assert!(is_public(&Method::GET, "/api/health"));
        assert!(is_public(&Method::POST, "/api/auth/login"));
        assert!(is_public(&Method::POST, "/api/auth/staff/login"));
        assert!(is_public(&Method::POST, "/api/auth/register"));
        assert!(is_public(&Method::GET, "/api/hotel"));
        assert!(is_public(&Method::GET, "/api/hotel/123"));
        assert!(is_public(&Method::GET, "/api/room"));
    }

    #[test]
    fn protected_routes() {
        assert!(!is_public(&Method::POST, "/api/hotel"));
        assert!(!is_public(&Method::DELETE, "/api/hotel/123"));
        assert!(!is_public(&Method::GET, "/api/hotel/123/staff"));
        assert!(!is_public(&Method::GET, "/api/room/clean"));
        assert!(!is_public(&Method::GET, "/api/booking"));
        assert!(!is_public(&Method::POST, "/api/auth/logout"));
    }
}
