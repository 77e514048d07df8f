//! # Cart Types
//!
//! Request, line item and result types for the checkout flow.

use serde::{Deserialize, Deserializer, Serialize};

/// One requested purchase line as sent by the client.
///
/// Both fields are optional on the wire so that a missing value is reported
/// by checkout validation instead of failing JSON extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLineRequest {
    /// Provider-side price identifier (e.g. Stripe `price_...`)
    #[serde(default, alias = "priceId")]
    pub price_reference: Option<String>,

    /// Requested quantity
    #[serde(default)]
    pub quantity: Option<i64>,
}

impl ProductLineRequest {
    pub fn new(price_reference: impl Into<String>, quantity: i64) -> Self {
        Self {
            price_reference: Some(price_reference.into()),
            quantity: Some(quantity),
        }
    }
}

/// An ordered collection of lines submitted together for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartRequest {
    /// A missing or `null` array reads as an empty cart
    #[serde(default, deserialize_with = "null_as_empty")]
    pub products: Vec<ProductLineRequest>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ProductLineRequest>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ProductLineRequest>>::deserialize(deserializer)?.unwrap_or_default())
}

impl CartRequest {
    pub fn new(products: Vec<ProductLineRequest>) -> Self {
        Self { products }
    }

    /// Check if cart is empty
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// A validated (price reference, quantity) pair sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub price_reference: String,
    pub quantity: u64,
}

/// Checkout mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutMode {
    /// One-time payment
    #[default]
    Payment,
}

impl CheckoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutMode::Payment => "payment",
        }
    }
}

/// A single hosted checkout session request handed to a gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRequest {
    pub mode: CheckoutMode,
    pub line_items: Vec<LineItem>,
    pub success_url: String,
    pub cancel_url: String,
}

impl SessionRequest {
    /// Total number of units across all line items
    pub fn item_count(&self) -> u64 {
        self.line_items.iter().map(|item| item.quantity).sum()
    }
}

/// A checkout session created by a payment provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session ID
    pub session_id: String,

    /// URL to redirect customer to for payment
    pub session_url: String,
}

impl CheckoutSession {
    pub fn new(session_id: impl Into<String>, session_url: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            session_url: session_url.into(),
        }
    }
}

/// Outcome of a checkout call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutStatus {
    Success,
    Failed,
}

/// Uniform checkout response.
///
/// `session_id` and `session_url` are set only for successful results; the
/// fields are private so the only way to build one is through
/// [`CheckoutResult::success`] or [`CheckoutResult::failed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResult {
    status: CheckoutStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_url: Option<String>,
}

pub const SESSION_CREATED_MESSAGE: &str = "Payment session is created successfully";

impl CheckoutResult {
    pub fn success(session: CheckoutSession) -> Self {
        Self {
            status: CheckoutStatus::Success,
            message: SESSION_CREATED_MESSAGE.to_string(),
            session_id: Some(session.session_id),
            session_url: Some(session.session_url),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: CheckoutStatus::Failed,
            message: message.into(),
            session_id: None,
            session_url: None,
        }
    }

    pub fn status(&self) -> CheckoutStatus {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == CheckoutStatus::Success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn session_url(&self) -> Option<&str> {
        self.session_url.as_deref()
    }
}
