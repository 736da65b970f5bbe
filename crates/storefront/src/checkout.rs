//! Checkout orchestration.
//!
//! Gathers buyer-entered order fields, computes the displayed price
//! breakdown, and submits a single order referencing the live cart session
//! at submission time.

use std::sync::{Arc, Mutex, PoisonError};

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::error;

use shopfront_core::{Email, EmailError, display_amount};

use crate::cart::CartSession;
use crate::commerce::{CommerceApi, CommerceError, OrderRequest, OrderResult};
use crate::config::PricingConfig;

/// Buyer-entered order fields.
///
/// `name`, `email` and `address` are required at submission; `phone`,
/// `note` and `discount_coupon` are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderForm {
    /// Buyer's full name.
    pub name: String,
    /// Buyer's email address.
    pub email: String,
    /// Buyer's phone number.
    pub phone: String,
    /// Shipping address.
    pub address: String,
    /// Free-form order note.
    pub note: String,
    /// Coupon code, passed through unvalidated.
    pub discount_coupon: String,
}

/// Where the checkout currently stands.
#[derive(Debug, Clone)]
pub enum CheckoutState {
    /// Nothing submitted yet, or reset for another order.
    Idle,
    /// An order submission is in flight; further submits are no-ops.
    Submitting,
    /// The backend created the order.
    Succeeded(OrderResult),
    /// The last submission failed; the form is preserved for a manual retry.
    Failed(String),
}

/// Errors raised by the checkout flow.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A required field was left empty. Caught before any network call.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The email address is structurally invalid. Caught before any
    /// network call.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Submission was attempted with an empty cart.
    #[error("cannot submit an order with an empty cart")]
    EmptyCart,

    /// The remote order call failed.
    #[error(transparent)]
    Commerce(#[from] CommerceError),
}

/// The displayed price breakdown.
///
/// All values carry full precision; rounding to two places happens only in
/// the display helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceBreakdown {
    /// Cart subtotal as confirmed by the backend.
    pub subtotal: Decimal,
    /// Discount amount. Always zero pending coupon-validation logic.
    pub discount: Decimal,
    /// Shipping fee from site configuration.
    pub shipping: Decimal,
    /// `subtotal - discount + shipping`.
    pub total: Decimal,
}

impl PriceBreakdown {
    /// Compute the breakdown for a given subtotal and shipping fee.
    #[must_use]
    pub fn compute(subtotal: Decimal, shipping: Decimal) -> Self {
        // Coupon application is not implemented; the discount is always 0.
        let discount = Decimal::ZERO;
        Self {
            subtotal,
            discount,
            shipping,
            total: subtotal - discount + shipping,
        }
    }

    /// Total formatted for display, e.g. `$180.00`.
    #[must_use]
    pub fn display_total(&self, currency_symbol: &str) -> String {
        display_amount(self.total, currency_symbol)
    }

    /// Subtotal formatted for display.
    #[must_use]
    pub fn display_subtotal(&self, currency_symbol: &str) -> String {
        display_amount(self.subtotal, currency_symbol)
    }
}

/// Checkout orchestrator, cheaply cloneable: clones share one form and one
/// state machine (`Idle -> Submitting -> {Succeeded, Failed}`).
#[derive(Clone)]
pub struct CheckoutFlow<C> {
    inner: Arc<FlowInner<C>>,
}

struct FlowInner<C> {
    api: C,
    cart: CartSession<C>,
    pricing: PricingConfig,
    state: Mutex<FlowState>,
}

#[derive(Debug)]
struct FlowState {
    form: OrderForm,
    phase: CheckoutState,
}

impl<C: CommerceApi> CheckoutFlow<C> {
    /// Create a flow submitting through `api` against the live `cart`.
    pub fn new(api: C, cart: CartSession<C>, pricing: PricingConfig) -> Self {
        Self {
            inner: Arc::new(FlowInner {
                api,
                cart,
                pricing,
                state: Mutex::new(FlowState {
                    form: OrderForm::default(),
                    phase: CheckoutState::Idle,
                }),
            }),
        }
    }

    /// Replace the working form.
    pub fn set_form(&self, form: OrderForm) {
        self.lock().form = form;
    }

    /// The current working form.
    #[must_use]
    pub fn form(&self) -> OrderForm {
        self.lock().form.clone()
    }

    /// The current checkout state.
    #[must_use]
    pub fn state(&self) -> CheckoutState {
        self.lock().phase.clone()
    }

    /// Return a terminal state (`Succeeded` or `Failed`) to `Idle` so the
    /// shopper can place another order.
    pub fn reset(&self) {
        let mut state = self.lock();
        if !matches!(state.phase, CheckoutState::Submitting) {
            state.phase = CheckoutState::Idle;
        }
    }

    /// Price breakdown against the live cart subtotal.
    #[must_use]
    pub fn breakdown(&self) -> PriceBreakdown {
        PriceBreakdown::compute(self.inner.cart.subtotal(), self.inner.pricing.shipping_fee)
    }

    /// Submit the order.
    ///
    /// Returns `Ok(None)` without doing anything when a submission is
    /// already in flight, so a double-click creates exactly one order. On
    /// success the working form is cleared and the created order returned;
    /// on failure the form is preserved and the flow moves to
    /// [`CheckoutState::Failed`] for a manual retry.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::MissingField`], [`CheckoutError::InvalidEmail`] and
    /// [`CheckoutError::EmptyCart`] are raised locally before any network
    /// call and leave the flow `Idle`. Remote failures surface as
    /// [`CheckoutError::Commerce`].
    pub async fn submit(&self) -> Result<Option<OrderResult>, CheckoutError> {
        let snapshot = self.inner.cart.snapshot();

        // Guard, validation and the phase flip happen under one lock so two
        // racing submits cannot both pass the guard.
        let (form, cart_token) = {
            let mut state = self.lock();
            if matches!(state.phase, CheckoutState::Submitting) {
                return Ok(None);
            }

            validate_form(&state.form)?;

            let Some(snapshot) = snapshot.filter(|s| !s.is_empty()) else {
                return Err(CheckoutError::EmptyCart);
            };

            state.phase = CheckoutState::Submitting;
            (state.form.clone(), snapshot.session_token)
        };

        let order = OrderRequest {
            cart_token,
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            note: form.note.clone(),
            address: form.address.trim().to_string(),
            currency: self.inner.pricing.currency.clone(),
            shipping: self.inner.pricing.shipping_fee,
            discount: Decimal::ZERO,
            discount_coupon: form.discount_coupon.clone(),
            method: self.inner.pricing.payment_method.clone(),
        };

        match self.inner.api.create_order(&order).await {
            Ok(result) => {
                let mut state = self.lock();
                state.phase = CheckoutState::Succeeded(result.clone());
                // Entered fields and coupon reset after a successful order.
                state.form = OrderForm::default();
                Ok(Some(result))
            }
            Err(e) => {
                error!(error = %e, "order submission failed");
                let mut state = self.lock();
                state.phase = CheckoutState::Failed(e.to_string());
                // Form stays as entered; nothing is lost on failure.
                Err(CheckoutError::Commerce(e))
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FlowState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Reject submissions with missing required fields before they cost a
/// network round trip.
fn validate_form(form: &OrderForm) -> Result<(), CheckoutError> {
    if form.name.trim().is_empty() {
        return Err(CheckoutError::MissingField("name"));
    }
    if form.email.trim().is_empty() {
        return Err(CheckoutError::MissingField("email"));
    }
    Email::parse(form.email.trim())?;
    if form.address.trim().is_empty() {
        return Err(CheckoutError::MissingField("address"));
    }
    Ok(())
}
