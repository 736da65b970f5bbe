//! Remote commerce API client.
//!
//! # Architecture
//!
//! - The backend is the source of truth: every cart mutation returns the
//!   full authoritative snapshot, which callers install locally.
//! - All requests are JSON over HTTP via `reqwest`; wire field names are a
//!   contract with the backend and are preserved exactly.
//! - The session token (`cart_id`) is read from and written to an injected
//!   [`TokenStore`](crate::token::TokenStore) rather than ambient state, so
//!   tests can substitute an in-memory store.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shopfront_storefront::{CommerceApi, CommerceClient, InMemoryTokenStore};
//!
//! let tokens = Arc::new(InMemoryTokenStore::new());
//! let client = CommerceClient::new(config.api_base_url.clone(), tokens);
//!
//! // First add creates the session; the returned cart_id is persisted.
//! let cart = client.add_to_cart(&sku, 1).await?;
//! assert!(cart.session_token.is_some());
//! ```

mod client;
mod conversions;
pub mod types;
pub mod wire;

pub use client::CommerceClient;
pub use types::{CartLine, CartSnapshot, OrderRequest, OrderResult};

use shopfront_core::Sku;
use thiserror::Error;

/// Errors that can occur when talking to the commerce backend.
#[derive(Debug, Error)]
pub enum CommerceError {
    /// Bad input caught before any network call.
    #[error("validation error: {0}")]
    Validation(String),

    /// Network failure or transport-level error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Original transport status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A cart operation came back with `success: false` despite a 2xx.
    #[error("cart request rejected (status {status}): {message}")]
    Rejected {
        /// Application-level status from the envelope.
        status: i64,
        /// Message from the envelope, if any.
        message: String,
    },

    /// Order creation came back with `success: false` despite a 2xx.
    #[error("order submission failed (status {status}): {message}")]
    Submission {
        /// Application-level status from the envelope.
        status: i64,
        /// Message from the envelope, if any.
        message: String,
    },
}

/// The narrow commerce service interface.
///
/// [`CartSession`](crate::cart::CartSession) and
/// [`CheckoutFlow`](crate::checkout::CheckoutFlow) consume this trait rather
/// than the concrete client, keeping presentation and session logic fully
/// decoupled from transport. [`CommerceClient`] is the production
/// implementation; tests substitute an in-memory fake.
///
/// # Contract
///
/// - `get_cart` with no persisted session token resolves to an empty
///   snapshot without performing any I/O.
/// - `add_to_cart` and `update_cart` reject a zero quantity with
///   [`CommerceError::Validation`] before any I/O; a quantity of 0 is never
///   silently coerced into a remove.
/// - `remove_from_cart` is idempotent: removing an absent sku is not an
///   error and returns the (possibly unchanged) snapshot.
/// - Every successful cart operation persists the returned session token.
/// - `create_order` is never retried by the implementation.
// These futures are awaited in place, never spawned, so auto-trait bounds
// are left to each implementation.
#[allow(async_fn_in_trait)]
pub trait CommerceApi {
    /// Fetch the current cart.
    async fn get_cart(&self) -> Result<CartSnapshot, CommerceError>;

    /// Add `quantity` of `sku` to the cart, merging with any existing line.
    async fn add_to_cart(&self, sku: &Sku, quantity: u32) -> Result<CartSnapshot, CommerceError>;

    /// Set the quantity of an existing cart line. `quantity` must be >= 1.
    async fn update_cart(&self, sku: &Sku, quantity: u32) -> Result<CartSnapshot, CommerceError>;

    /// Remove a line from the cart.
    async fn remove_from_cart(&self, sku: &Sku) -> Result<CartSnapshot, CommerceError>;

    /// Drop the cart and its session.
    async fn clear_cart(&self) -> Result<(), CommerceError>;

    /// Submit an order referencing the current cart session.
    async fn create_order(&self, order: &OrderRequest) -> Result<OrderResult, CommerceError>;
}
