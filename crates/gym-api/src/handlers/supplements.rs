//! Supplement catalog endpoints under `/api/supplements`.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use gym_core::{NewSupplement, Supplement};

/// List supplements that are still available
pub async fn list_supplements(
    State(state): State<AppState>,
) -> Result<Json<Vec<Supplement>>, ApiError> {
    Ok(Json(state.catalog.list_available().await?))
}

pub async fn list_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Supplement>>, ApiError> {
    Ok(Json(state.catalog.list_by_category(&category).await?))
}

pub async fn get_supplement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Supplement>, ApiError> {
    Ok(Json(state.catalog.get(id).await?))
}

pub async fn create_supplement(
    State(state): State<AppState>,
    Json(supplement): Json<NewSupplement>,
) -> Result<Json<Supplement>, ApiError> {
    Ok(Json(state.catalog.create(supplement).await?))
}

pub async fn update_supplement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(details): Json<NewSupplement>,
) -> Result<Json<Supplement>, ApiError> {
    Ok(Json(state.catalog.update(id, details).await?))
}

/// Soft delete: the supplement stays but is no longer listed
pub async fn delete_supplement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.catalog.soft_delete(id).await?;
    Ok(StatusCode::OK)
}
