//! Cart session store.
//!
//! The single source of truth for "what's in the cart" during a browsing
//! session. Mutations delegate to the commerce API; the locally held
//! snapshot always reflects the most recent successful remote response and
//! never advances optimistically ahead of confirmation.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use rust_decimal::Decimal;

use shopfront_core::Sku;

use crate::commerce::{CartSnapshot, CommerceApi, CommerceError};

/// The cart as the session currently knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartState {
    /// [`CartSession::hydrate`] has not completed yet.
    NotLoaded,
    /// The cart exists conceptually but has no lines (or no session exists
    /// yet). Absence of a cart is not an error.
    Empty,
    /// The most recent server-confirmed snapshot.
    Loaded(CartSnapshot),
}

/// Cart session store, cheaply cloneable: clones share one snapshot.
///
/// Concurrent mutations are neither queued nor coalesced; each one
/// independently reads and writes the shared snapshot, so the last response
/// to resolve wins. Acceptable for a single shopper issuing low-frequency
/// interactions, since every snapshot installed here is server-confirmed.
#[derive(Clone)]
pub struct CartSession<C> {
    inner: Arc<SessionInner<C>>,
}

struct SessionInner<C> {
    api: C,
    state: Mutex<SessionState>,
}

#[derive(Debug)]
struct SessionState {
    cart: CartState,
    busy: bool,
}

impl<C: CommerceApi> CartSession<C> {
    /// Create a session over `api`. Call [`hydrate`](Self::hydrate) next to
    /// load any pre-existing cart.
    pub fn new(api: C) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                api,
                state: Mutex::new(SessionState {
                    cart: CartState::NotLoaded,
                    busy: false,
                }),
            }),
        }
    }

    /// Load the cart from any pre-existing session token.
    ///
    /// Performed exactly once on initialization by convention. When no
    /// session exists the store settles into [`CartState::Empty`] rather
    /// than treating absence as an error.
    ///
    /// # Errors
    ///
    /// Propagates transport failures; the state stays [`CartState::NotLoaded`]
    /// so a caller may retry.
    pub async fn hydrate(&self) -> Result<(), CommerceError> {
        self.set_busy(true);
        let result = self.inner.api.get_cart().await;
        let out = match result {
            Ok(snapshot) => {
                self.install(snapshot);
                Ok(())
            }
            Err(e) => Err(e),
        };
        self.set_busy(false);
        out
    }

    /// Add `quantity` of `sku` to the cart.
    ///
    /// # Errors
    ///
    /// Propagates validation and remote failures; the local snapshot is left
    /// untouched on failure.
    pub async fn add_to_cart(
        &self,
        sku: &Sku,
        quantity: u32,
    ) -> Result<CartSnapshot, CommerceError> {
        self.apply(self.inner.api.add_to_cart(sku, quantity)).await
    }

    /// Set the quantity of an existing line. Quantity 0 is rejected; use
    /// [`remove_from_cart`](Self::remove_from_cart) instead.
    ///
    /// # Errors
    ///
    /// Propagates validation and remote failures; the local snapshot is left
    /// untouched on failure.
    pub async fn update_cart(
        &self,
        sku: &Sku,
        quantity: u32,
    ) -> Result<CartSnapshot, CommerceError> {
        self.apply(self.inner.api.update_cart(sku, quantity)).await
    }

    /// Remove a line from the cart. Idempotent.
    ///
    /// # Errors
    ///
    /// Propagates remote failures; the local snapshot is left untouched on
    /// failure.
    pub async fn remove_from_cart(&self, sku: &Sku) -> Result<CartSnapshot, CommerceError> {
        self.apply(self.inner.api.remove_from_cart(sku)).await
    }

    /// Drop the cart and its session entirely.
    ///
    /// # Errors
    ///
    /// Propagates remote failures; the local snapshot is left untouched on
    /// failure.
    pub async fn clear(&self) -> Result<(), CommerceError> {
        self.set_busy(true);
        let result = self.inner.api.clear_cart().await;
        let out = match result {
            Ok(()) => {
                self.lock().cart = CartState::Empty;
                Ok(())
            }
            Err(e) => Err(e),
        };
        self.set_busy(false);
        out
    }

    /// The current cart state.
    #[must_use]
    pub fn state(&self) -> CartState {
        self.lock().cart.clone()
    }

    /// The current snapshot, when one is loaded.
    #[must_use]
    pub fn snapshot(&self) -> Option<CartSnapshot> {
        match &self.lock().cart {
            CartState::Loaded(snapshot) => Some(snapshot.clone()),
            CartState::NotLoaded | CartState::Empty => None,
        }
    }

    /// Whether an operation is currently in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.lock().busy
    }

    /// Server-derived subtotal of the current snapshot, zero when none.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.snapshot().map_or(Decimal::ZERO, |s| s.subtotal)
    }

    /// Total item quantity in the current snapshot, zero when none.
    #[must_use]
    pub fn line_count(&self) -> u32 {
        self.snapshot().map_or(0, |s| s.line_count)
    }

    /// Run one cart mutation: mark busy, delegate, install the server's
    /// snapshot on success, clear busy regardless of outcome.
    async fn apply<F>(&self, op: F) -> Result<CartSnapshot, CommerceError>
    where
        F: Future<Output = Result<CartSnapshot, CommerceError>>,
    {
        self.set_busy(true);
        let result = op.await;
        let out = match result {
            Ok(snapshot) => {
                self.install(snapshot.clone());
                Ok(snapshot)
            }
            // Previous snapshot stays intact; the caller owns the retry.
            Err(e) => Err(e),
        };
        self.set_busy(false);
        out
    }

    fn install(&self, snapshot: CartSnapshot) {
        self.lock().cart = if snapshot.is_empty() {
            CartState::Empty
        } else {
            CartState::Loaded(snapshot)
        };
    }

    fn set_busy(&self, busy: bool) {
        self.lock().busy = busy;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
