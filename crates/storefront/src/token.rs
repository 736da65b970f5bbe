//! Session token persistence.
//!
//! The cart session token (`cart_id`) is assigned by the backend on the
//! first mutation and must survive page reloads; where it actually lives
//! (browser storage, a cookie jar, a file) is the embedder's concern. The
//! store is an explicit dependency injected into
//! [`CommerceClient`](crate::commerce::CommerceClient) rather than a
//! module-level singleton, so tests can substitute an in-memory store.

use std::sync::{Mutex, PoisonError};

/// Persistence for the opaque cart session token.
///
/// The token is read before each cart call and overwritten after each
/// successful one; last write wins, which is sufficient for one session
/// acting on behalf of one shopper.
pub trait TokenStore: Send + Sync {
    /// The currently persisted token, if any.
    fn get(&self) -> Option<String>;

    /// Persist `token`, overwriting any prior value.
    fn set(&self, token: &str);

    /// Forget the persisted token.
    fn clear(&self);
}

/// A process-local token store.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl InMemoryTokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a pre-existing token.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for InMemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, token: &str) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
