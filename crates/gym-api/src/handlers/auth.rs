//! Authentication and profile endpoints under `/api/auth`.

use crate::error::ApiError;
use crate::extract::BearerToken;
use crate::state::AppState;
use axum::{extract::State, Json};
use gym_core::{
    AuthResponse, ChangePasswordRequest, LoginRequest, ProfileUpdateRequest, RegisterRequest,
    UserProfile,
};

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    Ok(Json(state.auth.login(request).await?))
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    Ok(Json(state.auth.register(request).await?))
}

pub async fn get_profile(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<Json<UserProfile>, ApiError> {
    Ok(Json(state.auth.profile(token.as_str()).await?))
}

pub async fn update_profile(
    State(state): State<AppState>,
    token: BearerToken,
    Json(update): Json<ProfileUpdateRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    Ok(Json(state.auth.update_profile(token.as_str(), update).await?))
}

pub async fn change_password(
    State(state): State<AppState>,
    token: BearerToken,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<&'static str, ApiError> {
    state.auth.change_password(token.as_str(), request).await?;
    Ok("Password changed successfully")
}

pub async fn delete_account(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<&'static str, ApiError> {
    state.auth.delete_account(token.as_str()).await?;
    Ok("Account deleted successfully")
}
