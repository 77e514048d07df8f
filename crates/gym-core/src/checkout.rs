//! # Checkout Orchestrator
//!
//! Validates a cart (or a single line), translates it into one session
//! request and asks the payment gateway for a hosted checkout session.
//!
//! Validation is fail-fast: the gateway is called only after every line has
//! passed, so a rejected cart never produces a partial provider call.

use crate::cart::{
    CartRequest, CheckoutMode, CheckoutResult, CheckoutSession, LineItem, ProductLineRequest,
    SessionRequest,
};
use crate::gateway::{BoxedPaymentGateway, CheckoutUrls};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Why a checkout did not produce a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Missing price reference for one or more items")]
    MissingPriceReference,

    #[error("Invalid quantity for one or more items")]
    InvalidQuantity,

    /// The provider rejected or failed the session request
    #[error("Failed to create payment session: {0}")]
    Provider(String),
}

impl CheckoutError {
    /// True for errors caught before the provider was contacted
    pub fn is_validation(&self) -> bool {
        !matches!(self, CheckoutError::Provider(_))
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        if self.is_validation() {
            400
        } else {
            502
        }
    }
}

impl From<Result<CheckoutSession, CheckoutError>> for CheckoutResult {
    fn from(outcome: Result<CheckoutSession, CheckoutError>) -> Self {
        match outcome {
            Ok(session) => CheckoutResult::success(session),
            Err(err) => CheckoutResult::failed(err.to_string()),
        }
    }
}

/// Turns carts into hosted checkout sessions.
#[derive(Clone)]
pub struct CheckoutOrchestrator {
    gateway: BoxedPaymentGateway,
    urls: CheckoutUrls,
}

impl CheckoutOrchestrator {
    pub fn new(gateway: BoxedPaymentGateway, urls: CheckoutUrls) -> Self {
        Self { gateway, urls }
    }

    /// Check out a whole cart.
    pub async fn checkout_cart(&self, cart: &CartRequest) -> CheckoutResult {
        self.try_checkout_cart(cart).await.into()
    }

    /// Check out a single line.
    pub async fn checkout_single(&self, line: &ProductLineRequest) -> CheckoutResult {
        self.try_checkout_single(line).await.into()
    }

    #[instrument(skip(self, cart), fields(lines = cart.products.len()))]
    pub async fn try_checkout_cart(
        &self,
        cart: &CartRequest,
    ) -> Result<CheckoutSession, CheckoutError> {
        if cart.is_empty() {
            warn!("Rejected checkout: {}", CheckoutError::EmptyCart);
            return Err(CheckoutError::EmptyCart);
        }

        let line_items = cart
            .products
            .iter()
            .map(validate_line)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|err| warn!("Rejected checkout: {}", err))?;

        self.create_session(line_items).await
    }

    #[instrument(skip(self, line))]
    pub async fn try_checkout_single(
        &self,
        line: &ProductLineRequest,
    ) -> Result<CheckoutSession, CheckoutError> {
        let item = validate_line(line).inspect_err(|err| warn!("Rejected checkout: {}", err))?;
        self.create_session(vec![item]).await
    }

    async fn create_session(
        &self,
        line_items: Vec<LineItem>,
    ) -> Result<CheckoutSession, CheckoutError> {
        let request = SessionRequest {
            mode: CheckoutMode::Payment,
            line_items,
            success_url: self.urls.success_url.clone(),
            cancel_url: self.urls.cancel_url.clone(),
        };

        debug!(
            "Requesting {} session: {} lines, {} units",
            self.gateway.provider_name(),
            request.line_items.len(),
            request.item_count()
        );

        match self.gateway.create_session(&request).await {
            Ok(session) => {
                info!("Created checkout session: {}", session.session_id);
                Ok(session)
            }
            Err(err) => {
                warn!("Payment gateway error: {}", err);
                Err(CheckoutError::Provider(err.reason().to_string()))
            }
        }
    }
}

fn validate_line(line: &ProductLineRequest) -> Result<LineItem, CheckoutError> {
    let price_reference = match line.price_reference.as_deref() {
        Some(reference) if !reference.trim().is_empty() => reference,
        _ => return Err(CheckoutError::MissingPriceReference),
    };

    let quantity = match line.quantity {
        Some(quantity) if quantity > 0 => quantity as u64,
        _ => return Err(CheckoutError::InvalidQuantity),
    };

    Ok(LineItem {
        price_reference: price_reference.to_string(),
        quantity,
    })
}
