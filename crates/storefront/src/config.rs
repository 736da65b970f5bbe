//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPFRONT_API_BASE_URL` - Base URL of the commerce backend
//!
//! ## Optional
//! - `SHOPFRONT_SHIPPING_FEE` - Flat shipping fee from site configuration
//!   (default: 0; unparseable values also fall back to 0)
//! - `SHOPFRONT_CURRENCY` - Currency symbol for display and orders
//!   (default: `$`)
//! - `SHOPFRONT_PAYMENT_METHOD` - Payment method tag sent with orders
//!   (default: `COD`)

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the commerce backend.
    pub api_base_url: Url,
    /// Pricing values sourced from site configuration.
    pub pricing: PricingConfig,
}

/// Pricing values that feed the checkout breakdown and order submission.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// Currency symbol, e.g. `$`.
    pub currency: String,
    /// Flat shipping fee. Not user input.
    pub shipping_fee: Decimal,
    /// Payment method tag, e.g. `COD`.
    pub payment_method: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: "$".to_string(),
            shipping_fee: Decimal::ZERO,
            payment_method: "COD".to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `SHOPFRONT_API_BASE_URL` is missing or not
    /// a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_required_env("SHOPFRONT_API_BASE_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPFRONT_API_BASE_URL".to_string(), e.to_string())
            })?;

        Ok(Self {
            api_base_url,
            pricing: PricingConfig::from_env(),
        })
    }
}

impl PricingConfig {
    fn from_env() -> Self {
        Self {
            currency: get_env_or_default("SHOPFRONT_CURRENCY", "$"),
            shipping_fee: parse_shipping_fee(get_optional_env("SHOPFRONT_SHIPPING_FEE").as_deref()),
            payment_method: get_env_or_default("SHOPFRONT_PAYMENT_METHOD", "COD"),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Shipping fee comes from site configuration. A missing or unparseable
/// value falls back to zero rather than failing startup.
fn parse_shipping_fee(raw: Option<&str>) -> Decimal {
    let Some(raw) = raw else {
        return Decimal::ZERO;
    };

    raw.trim().parse().unwrap_or_else(|_| {
        warn!(value = %raw, "unparseable shipping fee, defaulting to 0");
        Decimal::ZERO
    })
}
