//! # Payment Gateway Trait
//!
//! Seam between the checkout orchestrator and a hosted-checkout provider.
//!
//! ```text
//! ┌──────────────────────┐       ┌──────────────────────────┐
//! │ CheckoutOrchestrator │──────▶│ PaymentGateway (trait)   │
//! └──────────────────────┘       │  ├── create_session()    │
//!                                │  └── provider_name()     │
//!                                └────────────▲─────────────┘
//!                                             │
//!                                ┌────────────┴─────────────┐
//!                                │  StripeCheckoutGateway   │
//!                                │      (gym-stripe)        │
//!                                └──────────────────────────┘
//! ```

use crate::cart::{CheckoutSession, SessionRequest};
use crate::error::PaymentResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait for payment provider adapters.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create one hosted checkout session.
    ///
    /// Implementations must not retry: session creation is not safe to
    /// repeat without an idempotency key.
    async fn create_session(&self, request: &SessionRequest) -> PaymentResult<CheckoutSession>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared payment gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;

/// Redirect destinations handed to the provider with every session.
///
/// Cart and single-item checkout share one pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutUrls {
    /// Where the customer lands after paying
    pub success_url: String,
    /// Where the customer lands after abandoning the payment page
    pub cancel_url: String,
}

impl CheckoutUrls {
    pub fn new(success_url: impl Into<String>, cancel_url: impl Into<String>) -> Self {
        Self {
            success_url: success_url.into(),
            cancel_url: cancel_url.into(),
        }
    }
}

impl Default for CheckoutUrls {
    fn default() -> Self {
        Self::new("http://localhost:5173/success", "http://localhost:5173/cart")
    }
}
