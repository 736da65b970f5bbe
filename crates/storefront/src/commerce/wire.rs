//! Raw wire types for the commerce backend.
//!
//! Every request is a JSON `POST`; every cart endpoint answers with the same
//! envelope. Field names here are a contract with the backend and must be
//! preserved bit-for-bit.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::OrderResult;

// =============================================================================
// Request Bodies
// =============================================================================

/// Body for `/cart` and `/cart/clear`.
#[derive(Debug, Serialize)]
pub struct CartBody<'a> {
    /// Persisted session token, attached when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_id: Option<&'a str>,
}

/// Body for `/cart/add` and `/cart/update`.
#[derive(Debug, Serialize)]
pub struct CartLineBody<'a> {
    /// Sku of the line being added or updated.
    pub sku: &'a str,
    /// Requested quantity, always >= 1 by the time it reaches the wire.
    pub quantity: u32,
    /// Persisted session token, attached when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_id: Option<&'a str>,
}

/// Body for `/cart/remove`.
#[derive(Debug, Serialize)]
pub struct RemoveLineBody<'a> {
    /// Sku of the line being removed.
    pub sku: &'a str,
    /// Persisted session token, attached when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_id: Option<&'a str>,
}

// =============================================================================
// Response Envelopes
// =============================================================================

/// Envelope returned by every cart endpoint.
#[derive(Debug, Deserialize)]
pub struct CartEnvelope {
    /// Whether the operation was applied.
    pub success: bool,
    /// Application-level status code.
    pub status: i64,
    /// Human-readable message, if any.
    #[serde(default)]
    pub message: Option<String>,
    /// The authoritative cart state after the operation.
    #[serde(default)]
    pub data: Option<CartPayload>,
}

/// Cart state as carried inside [`CartEnvelope`].
#[derive(Debug, Deserialize)]
pub struct CartPayload {
    /// Cart lines in server order.
    #[serde(default)]
    pub products: Vec<WireCartProduct>,
    /// Server-derived subtotal.
    pub subtotal: Decimal,
    /// Total item quantity across all lines.
    pub count: u32,
    /// Opaque session token correlating this browser session with the
    /// server-side cart record.
    pub cart_id: String,
    /// Timestamp of the last mutation.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A single product line as carried inside [`CartPayload`].
#[derive(Debug, Deserialize)]
pub struct WireCartProduct {
    /// Stock-keeping unit.
    pub sku: String,
    /// Product display name.
    pub name: String,
    /// Unit price as a decimal string.
    pub price: Decimal,
    /// Quantity in the cart.
    pub quantity: u32,
    /// Thumbnail URL.
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Envelope returned by `/cart/clear`.
#[derive(Debug, Deserialize)]
pub struct ClearEnvelope {
    /// Whether the cart was dropped.
    pub success: bool,
    /// Application-level status code.
    #[serde(default)]
    pub status: i64,
    /// Human-readable message, if any.
    #[serde(default)]
    pub message: Option<String>,
}

/// Envelope returned by `/order/create`.
#[derive(Debug, Deserialize)]
pub struct OrderEnvelope {
    /// Whether the order was created.
    pub success: bool,
    /// Application-level status code.
    pub status: i64,
    /// Human-readable message, if any.
    #[serde(default)]
    pub message: Option<String>,
    /// The created order.
    #[serde(default)]
    pub data: Option<OrderResult>,
}
