//! # gym-core
//!
//! Core types, services and collaborator traits for the gym store backend.
//!
//! This crate provides:
//! - `CheckoutOrchestrator` turning carts into hosted checkout sessions
//! - `PaymentGateway` trait implemented by payment provider adapters
//! - `CatalogService` and `SupplementRepository` for the supplement catalog
//! - `AuthService` with the `TokenIssuer`, `PasswordEncoder` and
//!   `Authenticator` seams
//! - In-memory repositories for development and tests
//!
//! ## Example
//!
//! ```rust,ignore
//! use gym_core::{CartRequest, CheckoutOrchestrator, CheckoutUrls, ProductLineRequest};
//!
//! let orchestrator = CheckoutOrchestrator::new(gateway, CheckoutUrls::default());
//!
//! let cart = CartRequest::new(vec![ProductLineRequest::new("price_123", 2)]);
//! let result = orchestrator.checkout_cart(&cart).await;
//!
//! // Redirect user to result.session_url()
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod gateway;
pub mod memory;
pub mod supplement;
pub mod user;

// Re-exports for convenience
pub use auth::{
    AuthError, AuthResult, AuthService, Authenticator, PasswordAuthenticator, PasswordEncoder,
    TokenIssuer,
};
pub use cart::{
    CartRequest, CheckoutMode, CheckoutResult, CheckoutSession, CheckoutStatus, LineItem,
    ProductLineRequest, SessionRequest,
};
pub use catalog::{CatalogError, CatalogResult, CatalogService};
pub use checkout::{CheckoutError, CheckoutOrchestrator};
pub use error::{PaymentError, PaymentResult, RepositoryError};
pub use gateway::{BoxedPaymentGateway, CheckoutUrls, PaymentGateway};
pub use memory::{InMemorySupplementRepository, InMemoryUserRepository};
pub use supplement::{BoxedSupplementRepository, NewSupplement, Supplement, SupplementRepository};
pub use user::{
    AuthResponse, BoxedUserRepository, ChangePasswordRequest, LoginRequest, NewUser,
    ProfileUpdateRequest, RegisterRequest, User, UserProfile, UserRepository, DEFAULT_ROLE,
};
