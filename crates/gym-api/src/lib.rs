//! # gym-api
//!
//! HTTP API layer for the gym store backend.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Checkout, auth, supplement catalog and upload endpoints
//! - Postgres repositories, JWT tokens and Argon2 password hashing
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/product/v1/checkout` | Single-item checkout session |
//! | POST | `/product/v1/checkoutCart` | Cart checkout session |
//! | GET | `/product/v1/success` | Payment success page |
//! | POST | `/api/auth/login` | Log in |
//! | POST | `/api/auth/register` | Register |
//! | GET/PUT | `/api/auth/profile` | Read or update own profile |
//! | POST | `/api/auth/change-password` | Change password |
//! | DELETE | `/api/auth/delete-account` | Delete own account |
//! | GET/POST | `/api/supplements` | List available / create |
//! | GET | `/api/supplements/category/{category}` | List by category |
//! | GET/PUT/DELETE | `/api/supplements/{id}` | Get / replace / soft delete |
//! | POST | `/api/s3/upload` | Upload a file |

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod security;
pub mod state;
pub mod storage;

pub use config::AppConfig;
pub use error::{ApiError, ErrorResponse};
pub use routes::create_router;
pub use state::{AppState, Components};
pub use storage::{UploadError, UploadStore};
