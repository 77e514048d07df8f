//! # gym-stripe
//!
//! Stripe payment gateway for the gym store backend.
//!
//! `StripeCheckoutGateway` implements `gym_core::PaymentGateway` on top of
//! the Checkout Sessions API:
//! - line items reference existing Stripe prices (`price_...`)
//! - one session per call, never retried
//! - Stripe's error message is surfaced as the failure reason
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gym_stripe::{StripeCheckoutGateway, StripeConfig};
//! use gym_core::{CheckoutOrchestrator, CheckoutUrls};
//! use std::sync::Arc;
//!
//! let gateway = StripeCheckoutGateway::new(StripeConfig::from_env()?)?;
//! let orchestrator = CheckoutOrchestrator::new(Arc::new(gateway), CheckoutUrls::default());
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::StripeCheckoutGateway;
pub use config::StripeConfig;
