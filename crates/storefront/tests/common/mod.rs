//! In-memory commerce backend used by the integration tests.
//!
//! Implements the documented remote semantics: the first mutation creates
//! the session, adding an existing sku merges quantities, the subtotal is
//! recomputed on every mutation, and remove is idempotent.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;

use shopfront_core::Sku;
use shopfront_storefront::{
    CartLine, CartSnapshot, CommerceApi, CommerceError, OrderRequest, OrderResult,
};

/// Per-operation call counters, so tests can assert an operation never
/// reached the "network".
#[derive(Debug, Default, Clone, Copy)]
pub struct Calls {
    pub get: u32,
    pub add: u32,
    pub update: u32,
    pub remove: u32,
    pub clear: u32,
    pub order: u32,
}

/// Which operation an injected failure should hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOp {
    Add,
    Update,
    Remove,
    Clear,
    Order,
}

#[derive(Clone)]
pub struct FakeCommerce {
    inner: Arc<Mutex<FakeState>>,
    yield_on_order: bool,
}

struct FakeState {
    catalog: HashMap<String, Decimal>,
    lines: Vec<CartLine>,
    token: Option<String>,
    next_order: u32,
    calls: Calls,
    fail_next: Option<FailOp>,
    last_order: Option<OrderRequest>,
}

impl FakeCommerce {
    /// Create a backend selling the given `(sku, price)` catalog.
    pub fn new(catalog: &[(&str, &str)]) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeState {
                catalog: catalog
                    .iter()
                    .map(|(sku, price)| ((*sku).to_string(), price.parse().unwrap()))
                    .collect(),
                lines: Vec::new(),
                token: None,
                next_order: 1,
                calls: Calls::default(),
                fail_next: None,
                last_order: None,
            })),
            yield_on_order: false,
        }
    }

    /// Make `create_order` yield back to the scheduler once before
    /// completing, so a test can race a second submit against it.
    #[must_use]
    pub fn yielding_on_order(mut self) -> Self {
        self.yield_on_order = true;
        self
    }

    pub fn calls(&self) -> Calls {
        self.lock().calls
    }

    /// Fail the next occurrence of `op` with a rejected/submission error.
    pub fn fail_next(&self, op: FailOp) {
        self.lock().fail_next = Some(op);
    }

    /// The most recent order request this backend received.
    pub fn last_order(&self) -> Option<OrderRequest> {
        self.lock().last_order.clone()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot_of(state: &FakeState) -> CartSnapshot {
        let subtotal: Decimal = state.lines.iter().map(CartLine::line_total).sum();
        CartSnapshot {
            lines: state.lines.clone(),
            subtotal,
            line_count: state.lines.iter().map(|l| l.quantity).sum(),
            session_token: state.token.clone(),
            updated_at: None,
        }
    }

    fn check_failure(state: &mut FakeState, op: FailOp) -> Result<(), CommerceError> {
        if state.fail_next == Some(op) {
            state.fail_next = None;
            if op == FailOp::Order {
                return Err(CommerceError::Submission {
                    status: 500,
                    message: "injected failure".to_string(),
                });
            }
            return Err(CommerceError::Rejected {
                status: 500,
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

impl CommerceApi for FakeCommerce {
    async fn get_cart(&self) -> Result<CartSnapshot, CommerceError> {
        let mut state = self.lock();
        if state.token.is_none() {
            // No session: answered locally, not a remote call.
            return Ok(CartSnapshot::empty());
        }
        state.calls.get += 1;
        Ok(Self::snapshot_of(&state))
    }

    async fn add_to_cart(&self, sku: &Sku, quantity: u32) -> Result<CartSnapshot, CommerceError> {
        if quantity == 0 {
            return Err(CommerceError::Validation(
                "quantity must be a positive integer".to_string(),
            ));
        }

        let mut state = self.lock();
        state.calls.add += 1;
        Self::check_failure(&mut state, FailOp::Add)?;

        let price = state
            .catalog
            .get(sku.as_str())
            .copied()
            .ok_or(CommerceError::Rejected {
                status: 404,
                message: format!("unknown sku {sku}"),
            })?;

        // The first mutation creates the session.
        if state.token.is_none() {
            state.token = Some("cart-1".to_string());
        }

        match state.lines.iter_mut().find(|l| &l.sku == sku) {
            // Merge, never duplicate the line.
            Some(line) => line.quantity += quantity,
            None => state.lines.push(CartLine {
                sku: sku.clone(),
                name: format!("product {sku}"),
                unit_price: price,
                quantity,
                thumbnail: None,
            }),
        }

        Ok(Self::snapshot_of(&state))
    }

    async fn update_cart(&self, sku: &Sku, quantity: u32) -> Result<CartSnapshot, CommerceError> {
        if quantity == 0 {
            return Err(CommerceError::Validation(
                "quantity must be at least 1; use remove_from_cart to delete a line".to_string(),
            ));
        }

        let mut state = self.lock();
        state.calls.update += 1;
        Self::check_failure(&mut state, FailOp::Update)?;

        let line = state
            .lines
            .iter_mut()
            .find(|l| &l.sku == sku)
            .ok_or(CommerceError::Rejected {
                status: 422,
                message: format!("sku {sku} not in cart"),
            })?;
        line.quantity = quantity;

        Ok(Self::snapshot_of(&state))
    }

    async fn remove_from_cart(&self, sku: &Sku) -> Result<CartSnapshot, CommerceError> {
        let mut state = self.lock();
        state.calls.remove += 1;
        Self::check_failure(&mut state, FailOp::Remove)?;

        // Idempotent: removing an absent sku is not an error.
        state.lines.retain(|l| &l.sku != sku);

        Ok(Self::snapshot_of(&state))
    }

    async fn clear_cart(&self) -> Result<(), CommerceError> {
        let mut state = self.lock();
        state.calls.clear += 1;
        Self::check_failure(&mut state, FailOp::Clear)?;

        state.lines.clear();
        state.token = None;
        Ok(())
    }

    async fn create_order(&self, order: &OrderRequest) -> Result<OrderResult, CommerceError> {
        {
            let mut state = self.lock();
            state.calls.order += 1;
            state.last_order = Some(order.clone());
        }

        if self.yield_on_order {
            tokio::task::yield_now().await;
        }

        let mut state = self.lock();
        Self::check_failure(&mut state, FailOp::Order)?;

        let subtotal: Decimal = state.lines.iter().map(CartLine::line_total).sum();
        let order_no = format!("ORD-{:04}", 1000 + state.next_order);
        state.next_order += 1;

        Ok(OrderResult {
            order_no,
            subtotal,
            shipping: order.shipping,
            discount: order.discount,
            total: subtotal - order.discount + order.shipping,
            currency: order.currency.clone(),
            method: order.method.clone(),
            status: 1,
            created_at: None,
        })
    }
}
