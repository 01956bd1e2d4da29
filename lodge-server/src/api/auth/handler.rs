//! Auth API Handlers
//!
//! 注册、登录、登出、改密码和员工账户创建。
//!
//! 登录成功后把令牌摘要写入注册表，登出和改密码时移除，
//! 这样无状态 JWT 也能即时吊销。

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
};
use serde::{Deserialize, Serialize};
use shared::models::Role;

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::db::models::{Guest, GuestRegister, PrincipalKind, Staff, StaffCreate, token_digest};
use crate::db::repository::{guest, staff, token};
use crate::security_log;
use crate::services::email_status;
use crate::utils::{AppError, AppResponse, AppResult, ok, validation};

/// 登录/注册响应
#[derive(Serialize)]
pub struct AuthResponse<T> {
    pub token: String,
    pub account: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_status: Option<&'static str>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// 当前账户信息 (统一 guest/staff 两种形态)
#[derive(Serialize)]
#[serde(untagged)]
pub enum Account {
    Guest(Guest),
    Staff(Staff),
}

async fn issue_token(
    state: &ServerState,
    id: i64,
    name: &str,
    email: &str,
    role: Role,
) -> AppResult<String> {
    let token_str = state
        .jwt()
        .generate_token(id, name, email, role)
        .map_err(|e| AppError::internal(format!("Failed to issue token: {e}")))?;

    let kind = if role == Role::Customer {
        PrincipalKind::Guest
    } else {
        PrincipalKind::Staff
    };
    token::register(&state.pool, &token_digest(&token_str), kind, id).await?;
    Ok(token_str)
}

/// POST /api/auth/register - 客户注册 (公开)
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<GuestRegister>,
) -> AppResult<Json<AppResponse<AuthResponse<Guest>>>> {
    validation::check(&payload)?;
    validation::validate_required_text(&payload.name, "name", validation::MAX_NAME_LEN)?;
    if payload.password.len() > validation::MAX_PASSWORD_LEN {
        return Err(AppError::validation("password is too long"));
    }

    let account = guest::create(&state.pool, payload).await?;

    let token_str = issue_token(
        &state,
        account.id,
        &account.name,
        &account.email,
        Role::Customer,
    )
    .await?;

    let sent = state
        .notifier
        .send_welcome(&account.email, &account.name)
        .await;

    security_log!("INFO", "guest_registered", account_id = account.id);

    Ok(ok(AuthResponse {
        token: token_str,
        account,
        email_status: Some(email_status(&sent)),
    }))
}

/// POST /api/auth/login - 客户登录 (公开)
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<AuthResponse<Guest>>>> {
    let account = guest::find_by_email(&state.pool, &payload.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    let valid = account
        .verify_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !valid {
        security_log!("WARN", "guest_login_failed", email = payload.email.clone());
        return Err(AppError::invalid_credentials());
    }

    let token_str = issue_token(
        &state,
        account.id,
        &account.name,
        &account.email,
        Role::Customer,
    )
    .await?;

    Ok(ok(AuthResponse {
        token: token_str,
        account,
        email_status: None,
    }))
}

/// POST /api/auth/staff/login - 员工登录 (公开)
pub async fn staff_login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<AuthResponse<Staff>>>> {
    let account = staff::find_by_email(&state.pool, &payload.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    let valid = account
        .verify_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !valid {
        security_log!("WARN", "staff_login_failed", email = payload.email.clone());
        return Err(AppError::invalid_credentials());
    }

    let token_str = issue_token(
        &state,
        account.id,
        &account.name,
        &account.email,
        account.role,
    )
    .await?;

    Ok(ok(AuthResponse {
        token: token_str,
        account,
        email_status: None,
    }))
}

/// GET /api/auth/me - 当前账户信息
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Account>>> {
    let account = if user.role == Role::Customer {
        Account::Guest(
            guest::find_by_id(&state.pool, user.id)
                .await?
                .ok_or_else(|| AppError::not_found("Account not found"))?,
        )
    } else {
        Account::Staff(
            staff::find_by_id(&state.pool, user.id)
                .await?
                .ok_or_else(|| AppError::not_found("Account not found"))?,
        )
    };
    Ok(ok(account))
}

/// POST /api/auth/change-password - 修改密码
///
/// 成功后吊销该账户的所有令牌，客户端必须重新登录。
pub async fn change_password(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    if payload.new_password.len() < 8 {
        return Err(AppError::validation(
            "new_password must be at least 8 characters",
        ));
    }
    if payload.new_password.len() > validation::MAX_PASSWORD_LEN {
        return Err(AppError::validation("new_password is too long"));
    }

    let (kind, valid) = if user.role == Role::Customer {
        let account = guest::find_by_id(&state.pool, user.id)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))?;
        (
            PrincipalKind::Guest,
            account
                .verify_password(&payload.current_password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?,
        )
    } else {
        let account = staff::find_by_id(&state.pool, user.id)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))?;
        (
            PrincipalKind::Staff,
            account
                .verify_password(&payload.current_password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?,
        )
    };

    if !valid {
        return Err(AppError::validation("Current password is incorrect"));
    }

    if kind == PrincipalKind::Guest {
        guest::set_password(&state.pool, user.id, &payload.new_password).await?;
    } else {
        staff::set_password(&state.pool, user.id, &payload.new_password).await?;
    }
    let revoked = token::revoke_all(&state.pool, kind, user.id).await?;

    security_log!(
        "INFO",
        "password_changed",
        account_id = user.id,
        revoked_tokens = revoked
    );

    Ok(crate::utils::ok_with_message(
        (),
        "Password changed, please login again",
    ))
}

/// POST /api/auth/logout - 登出 (吊销当前令牌)
pub async fn logout(
    State(state): State<ServerState>,
    user: CurrentUser,
    headers: HeaderMap,
) -> AppResult<Json<AppResponse<()>>> {
    let raw = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(JwtService::extract_from_header)
        .ok_or_else(AppError::unauthorized)?;

    token::revoke(&state.pool, &token_digest(raw)).await?;
    security_log!("INFO", "logout", account_id = user.id);
    Ok(crate::utils::ok_with_message((), "Logged out"))
}

/// POST /api/auth/staff - 创建员工账户 (仅业主)
pub async fn create_staff(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<StaffCreate>,
) -> AppResult<Json<AppResponse<Staff>>> {
    validation::check(&payload)?;
    validation::validate_required_text(&payload.name, "name", validation::MAX_NAME_LEN)?;
    if payload.role == Role::Customer {
        return Err(AppError::validation(
            "Staff accounts cannot have the Customer role",
        ));
    }

    let account = staff::create(&state.pool, payload).await?;

    security_log!(
        "INFO",
        "staff_created",
        staff_id = account.id,
        role = account.role.to_string(),
        created_by = user.id
    );

    Ok(ok(account))
}
