//! Authentication Handlers

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use shared::client::{LoginRequest, LoginResponse, UserInfo};
use shared::error::{AppError, AppResult};

use crate::auth::{CurrentUser, verify_password};
use crate::core::ServerState;
use crate::db::repository::employee;
use crate::security_log;
use crate::utils::validation::{MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};

/// Fixed delay before answering, so unknown users and bad passwords take
/// the same time
const AUTH_FIXED_DELAY_MS: u64 = 150;

/// POST /api/auth/login
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    validate_required_text(&req.username, "username", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;

    let account = employee::find_by_username(&state.db.pool, req.username.trim()).await?;

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let account = match account {
        Some(a) if a.is_active && verify_password(&req.password, &a.hash_pass) => a,
        Some(a) => {
            let reason = if a.is_active { "invalid_password" } else { "account_disabled" };
            security_log!("WARN", "login_failed", username = req.username.as_str(), reason = reason);
            return Err(AppError::invalid_credentials());
        }
        None => {
            security_log!("WARN", "login_failed", username = req.username.as_str(), reason = "user_not_found");
            return Err(AppError::invalid_credentials());
        }
    };

    let user = UserInfo {
        id: account.id,
        username: account.username,
        display_name: account.display_name,
    };
    let token = state
        .jwt_service
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    security_log!("INFO", "login_success", user_id = user.id, username = user.username.as_str());

    Ok(Json(LoginResponse { token, user }))
}

/// GET /api/auth/me
pub async fn me(Extension(user): Extension<CurrentUser>) -> Json<UserInfo> {
    Json(user.into())
}
