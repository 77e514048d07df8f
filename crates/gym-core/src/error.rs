//! # Error Types
//!
//! Typed errors shared by the gym store services.
//! Payment gateways return `Result<T, PaymentError>`, repositories return
//! `Result<T, RepositoryError>`.

use thiserror::Error;

/// Error raised by a payment gateway adapter.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request could not be turned into a provider call
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Payment provider rejected the request
    #[error("Provider error [{provider}]: {message}")]
    Provider { provider: String, message: String },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    Network(String),

    /// Provider response could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaymentError {
    /// The bare reason reported by the provider or transport, without the
    /// variant prefix. This is what ends up in a failed checkout message.
    pub fn reason(&self) -> &str {
        match self {
            PaymentError::Configuration(reason)
            | PaymentError::InvalidRequest(reason)
            | PaymentError::Network(reason)
            | PaymentError::Serialization(reason) => reason,
            PaymentError::Provider { message, .. } => message,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

/// Error raised by a repository implementation.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A unique constraint was violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The row to update or delete does not exist
    #[error("Row not found: {0}")]
    NotFound(String),

    /// Backend failure (connection, query, decode)
    #[error("Storage backend error: {0}")]
    Backend(String),
}
