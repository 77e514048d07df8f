//! # Routes
//!
//! Axum router configuration for the gym store API.

use crate::handlers::{self, auth, checkout, supplements, uploads};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Checkout:
///   - POST /product/v1/checkout - Single-item checkout
///   - POST /product/v1/checkoutCart - Cart checkout
///   - GET  /product/v1/success - Success page
///
/// - Auth:
///   - POST /api/auth/login, /api/auth/register
///   - GET, PUT /api/auth/profile
///   - POST /api/auth/change-password
///   - DELETE /api/auth/delete-account
///
/// - Supplements:
///   - GET, POST /api/supplements
///   - GET /api/supplements/category/{category}
///   - GET, PUT, DELETE /api/supplements/{id}
///
/// - Uploads:
///   - POST /api/s3/upload - Multipart file upload
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origin);
    let max_upload_bytes = state.config.max_upload_bytes;

    let checkout_routes = Router::new()
        .route("/checkout", post(checkout::checkout_single))
        .route("/checkoutCart", post(checkout::checkout_cart))
        .route("/success", get(checkout::checkout_success));

    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/profile", get(auth::get_profile).put(auth::update_profile))
        .route("/change-password", post(auth::change_password))
        .route("/delete-account", delete(auth::delete_account));

    let supplement_routes = Router::new()
        .route(
            "/api/supplements",
            get(supplements::list_supplements).post(supplements::create_supplement),
        )
        .route(
            "/api/supplements/category/{category}",
            get(supplements::list_by_category),
        )
        .route(
            "/api/supplements/{id}",
            get(supplements::get_supplement)
                .put(supplements::update_supplement)
                .delete(supplements::delete_supplement),
        );

    let upload_routes = Router::new().route(
        "/upload",
        post(uploads::upload_file).layer(DefaultBodyLimit::max(max_upload_bytes)),
    );

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/product/v1", checkout_routes)
        .nest("/api/auth", auth_routes)
        .merge(supplement_routes)
        .nest("/api/s3", upload_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// CORS for the configured frontend origin; any origin if it does not parse.
fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    match origin.parse::<HeaderValue>() {
        Ok(origin) if origin != "*" => layer.allow_origin(origin),
        _ => {
            tracing::warn!("CORS origin {:?} not usable, allowing any origin", origin);
            layer.allow_origin(Any)
        }
    }
}
