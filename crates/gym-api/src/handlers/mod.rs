//! # Request Handlers
//!
//! Axum request handlers, one module per resource.

pub mod auth;
pub mod checkout;
pub mod supplements;
pub mod uploads;

use axum::{response::IntoResponse, Json};

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "gym-store",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
