use axum::{Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;

use super::{AccountResponse, ApiError, AppState, MessageResponse, UserDto};

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default, rename = "oldPassword")]
    pub old_password: String,
    #[serde(default, rename = "newPassword")]
    pub new_password: String,
}

/// GET /api/users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    let rows = state.accounts.list().await?;
    Ok(Json(rows.into_iter().map(UserDto::from).collect()))
}

/// POST /api/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let user = state
        .accounts
        .register(&payload.username, &payload.password)
        .await?;

    Ok(Json(AccountResponse {
        message: "registered".to_string(),
        user,
    }))
}

/// POST /api/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let user = state
        .accounts
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(AccountResponse {
        message: "login successful".to_string(),
        user,
    }))
}

/// POST /api/change-password
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .accounts
        .change_password(
            &payload.username,
            &payload.old_password,
            &payload.new_password,
        )
        .await?;

    Ok(Json(MessageResponse {
        message: "password updated".to_string(),
    }))
}
