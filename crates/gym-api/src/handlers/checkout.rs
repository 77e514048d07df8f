//! Checkout endpoints under `/product/v1`.
//!
//! The body is always a `CheckoutResult`; the status code tells rejected
//! carts (400) apart from provider failures (502).

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use gym_core::{CartRequest, CheckoutError, CheckoutResult, CheckoutSession, ProductLineRequest};
use tracing::{info, instrument};

type CheckoutResponse = (StatusCode, Json<CheckoutResult>);

/// Create a session for a single product line
#[instrument(skip(state, line))]
pub async fn checkout_single(
    State(state): State<AppState>,
    Json(line): Json<ProductLineRequest>,
) -> CheckoutResponse {
    respond(state.checkout.try_checkout_single(&line).await)
}

/// Create a session for a whole cart
#[instrument(skip(state, cart), fields(lines = cart.products.len()))]
pub async fn checkout_cart(
    State(state): State<AppState>,
    Json(cart): Json<CartRequest>,
) -> CheckoutResponse {
    respond(state.checkout.try_checkout_cart(&cart).await)
}

/// Landing page after a completed payment
pub async fn checkout_success() -> &'static str {
    "Payment succeeded! Thank you for your purchase."
}

fn respond(outcome: Result<CheckoutSession, CheckoutError>) -> CheckoutResponse {
    let status = match &outcome {
        Ok(session) => {
            info!("Created checkout session: {}", session.session_id);
            StatusCode::OK
        }
        Err(err) => StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_GATEWAY),
    };
    (status, Json(CheckoutResult::from(outcome)))
}
