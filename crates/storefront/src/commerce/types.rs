//! Domain types for the commerce API.
//!
//! These types provide a clean, ergonomic API separate from the raw wire
//! envelopes in [`wire`](super::wire). [`OrderRequest`] and [`OrderResult`]
//! double as their own wire representation: their serde field names are the
//! backend contract and must not change.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopfront_core::Sku;

// =============================================================================
// Cart Types
// =============================================================================

/// A single line in the cart, keyed by sku.
///
/// There is no separate line id; adding an existing sku merges quantities
/// server-side rather than duplicating the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// Stock-keeping unit, unique per cart.
    pub sku: Sku,
    /// Display name of the product.
    pub name: String,
    /// Unit price at full precision.
    pub unit_price: Decimal,
    /// Quantity, always >= 1 in a server-returned snapshot.
    pub quantity: u32,
    /// Thumbnail image URL, if the product has one.
    pub thumbnail: Option<String>,
}

impl CartLine {
    /// Price of this line: `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// The full state of a cart as returned by the backend after any operation.
///
/// `subtotal` is derived server-side on every mutation and trusted as
/// returned; it always equals the sum of the line totals.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartSnapshot {
    /// Ordered cart lines.
    pub lines: Vec<CartLine>,
    /// Sum of `unit_price * quantity` over all lines, server-derived.
    pub subtotal: Decimal,
    /// Total item quantity across all lines, server-derived.
    pub line_count: u32,
    /// Opaque session token (`cart_id`). `None` means no cart exists yet.
    pub session_token: Option<String>,
    /// Server-side timestamp of the last mutation.
    pub updated_at: Option<DateTime<Utc>>,
}

impl CartSnapshot {
    /// An empty snapshot with no session.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up a line by sku.
    #[must_use]
    pub fn line(&self, sku: &Sku) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.sku == sku)
    }

    /// Recompute the subtotal from the lines.
    ///
    /// Exposed so callers can cross-check the server-derived `subtotal`;
    /// the two are equal for any well-formed snapshot.
    #[must_use]
    pub fn computed_subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

// =============================================================================
// Order Types
// =============================================================================

/// An order submission, built fresh per attempt and never persisted
/// client-side beyond that attempt.
///
/// Serializes to the exact body the backend expects on `/order/create`.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    /// Session token of the cart being ordered; omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_token: Option<String>,
    /// Buyer's full name. Required.
    pub name: String,
    /// Buyer's email address. Required.
    pub email: String,
    /// Buyer's phone number. Optional, may be empty.
    pub phone: String,
    /// Free-form order note. Optional, may be empty.
    pub note: String,
    /// Shipping address. Required.
    pub address: String,
    /// Currency symbol the storefront displays prices in.
    pub currency: String,
    /// Shipping fee sourced from site configuration, not user input.
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping: Decimal,
    /// Discount amount. Always zero pending coupon-validation logic.
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    /// Coupon code entered by the buyer, passed through unvalidated.
    pub discount_coupon: String,
    /// Payment method tag, e.g. `COD`.
    pub method: String,
}

/// A created order as echoed back by the backend. Immutable from the
/// client's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderResult {
    /// Backend-assigned order number.
    pub order_no: String,
    /// Echoed subtotal.
    pub subtotal: Decimal,
    /// Echoed shipping fee.
    pub shipping: Decimal,
    /// Echoed discount.
    pub discount: Decimal,
    /// Echoed grand total.
    pub total: Decimal,
    /// Echoed currency symbol.
    #[serde(default)]
    pub currency: String,
    /// Echoed payment method.
    #[serde(default)]
    pub method: String,
    /// Backend order status code.
    #[serde(default)]
    pub status: i64,
    /// Server-side creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
