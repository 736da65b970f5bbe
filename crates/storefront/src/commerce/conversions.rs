//! Wire-to-domain conversion functions.

use tracing::warn;

use shopfront_core::Sku;

use super::types::{CartLine, CartSnapshot};
use super::wire::{CartPayload, WireCartProduct};

/// Convert a cart payload into a domain snapshot.
///
/// The server-derived subtotal is trusted as returned; it is recomputed
/// server-side on every mutation.
pub fn convert_cart(payload: CartPayload) -> CartSnapshot {
    CartSnapshot {
        lines: payload
            .products
            .into_iter()
            .filter_map(convert_line)
            .collect(),
        subtotal: payload.subtotal,
        line_count: payload.count,
        session_token: Some(payload.cart_id),
        updated_at: payload.updated_at,
    }
}

fn convert_line(product: WireCartProduct) -> Option<CartLine> {
    let sku = match Sku::parse(&product.sku) {
        Ok(sku) => sku,
        Err(e) => {
            warn!(name = %product.name, error = %e, "dropping cart line with malformed sku");
            return None;
        }
    };

    Some(CartLine {
        sku,
        name: product.name,
        unit_price: product.price,
        quantity: product.quantity,
        thumbnail: product.thumbnail,
    })
}
