//! HTTP error mapping.
//!
//! Domain errors carry their own `status_code()`; this module turns them into
//! a JSON [`ErrorResponse`] with that status.

use crate::storage::UploadError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gym_core::{AuthError, CatalogError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Upload failed: {0}")]
    Upload(#[from] UploadError),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Auth(err) => err.status_code(),
            ApiError::Catalog(err) => err.status_code(),
            ApiError::Upload(err) => err.status_code(),
            ApiError::Unauthorized(_) => 401,
            ApiError::BadRequest(_) => 400,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.status_code();
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Backend failures keep their detail in the log only.
        let message = if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
            match &self {
                ApiError::Upload(_) => self.to_string(),
                _ => "Internal server error".to_string(),
            }
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse::new(message, code))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gym_core::RepositoryError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::from(AuthError::Conflict).status_code(), 409);
        assert_eq!(ApiError::from(AuthError::InvalidCredentials).status_code(), 401);
        assert_eq!(ApiError::from(CatalogError::NotFound(3)).status_code(), 404);
        assert_eq!(ApiError::Unauthorized("x".into()).status_code(), 401);
        assert_eq!(ApiError::BadRequest("x".into()).status_code(), 400);
    }

    #[test]
    fn test_backend_detail_is_hidden() {
        let response = ApiError::from(CatalogError::Repository(RepositoryError::Backend(
            "connection refused".into(),
        )))
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_response_shape() {
        let json = serde_json::to_value(ErrorResponse::new("Email is already taken!", 409)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": "Email is already taken!", "code": 409})
        );
    }
}
