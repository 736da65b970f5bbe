//! Shopfront storefront library.
//!
//! Cart session and checkout client for the Shopfront commerce backend.
//! Any rendering layer consumes the narrow service interface exposed here;
//! presentation stays fully decoupled from the session and checkout logic.
//!
//! # Architecture
//!
//! - [`commerce`] - typed client over the backend's cart and order endpoints
//! - [`cart`] - the authoritative cart snapshot and its mutations
//! - [`checkout`] - order form, price breakdown, single-submission flow
//! - [`token`] - injected persistence for the cart session token
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shopfront_storefront::{
//!     CartSession, CheckoutFlow, CommerceClient, InMemoryTokenStore, StorefrontConfig,
//! };
//!
//! let config = StorefrontConfig::from_env()?;
//! let client = CommerceClient::new(config.api_base_url.clone(), Arc::new(InMemoryTokenStore::new()));
//!
//! let cart = CartSession::new(client.clone());
//! cart.hydrate().await?;
//!
//! let checkout = CheckoutFlow::new(client, cart.clone(), config.pricing.clone());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod commerce;
pub mod config;
pub mod token;

pub use cart::{CartSession, CartState};
pub use checkout::{CheckoutError, CheckoutFlow, CheckoutState, OrderForm, PriceBreakdown};
pub use commerce::{
    CartLine, CartSnapshot, CommerceApi, CommerceClient, CommerceError, OrderRequest, OrderResult,
};
pub use config::{ConfigError, PricingConfig, StorefrontConfig};
pub use token::{InMemoryTokenStore, TokenStore};
