//! HTTP implementation of the commerce API.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{error, instrument};
use url::Url;

use shopfront_core::Sku;

use crate::token::TokenStore;

use super::conversions::convert_cart;
use super::types::{CartSnapshot, OrderRequest, OrderResult};
use super::wire::{CartBody, CartEnvelope, CartLineBody, ClearEnvelope, OrderEnvelope, RemoveLineBody};
use super::{CommerceApi, CommerceError};

/// Client for the commerce backend's cart and order endpoints.
///
/// Cheaply cloneable; clones share the underlying connection pool and token
/// store. The client does no business logic beyond translating typed
/// operations into requests and typed responses back, and never assumes
/// network reliability: failures propagate to the caller, which owns the
/// decision to retry or surface them.
#[derive(Clone)]
pub struct CommerceClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
}

impl CommerceClient {
    /// Create a new client against `base_url`, persisting session tokens
    /// through `tokens`.
    #[must_use]
    pub fn new(base_url: Url, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http: reqwest::Client::new(),
                base_url,
                tokens,
            }),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{path}",
            self.inner.base_url.as_str().trim_end_matches('/')
        )
    }

    fn token(&self) -> Option<String> {
        self.inner.tokens.get()
    }

    /// Execute a JSON POST and decode the response body.
    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, CommerceError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .inner
            .http
            .post(self.endpoint(path))
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();

        // Body is read as text first for better error diagnostics.
        let text = response.text().await?;

        if !status.is_success() {
            error!(
                status = %status,
                body = %text.chars().take(500).collect::<String>(),
                "commerce API returned non-success status"
            );
            return Err(CommerceError::Status {
                status: status.as_u16(),
                body: text.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            error!(
                error = %e,
                body = %text.chars().take(500).collect::<String>(),
                "failed to parse commerce API response"
            );
            CommerceError::Parse(e)
        })
    }

    /// Execute a cart call and install the returned session token.
    async fn cart_call<B>(&self, path: &str, body: &B) -> Result<CartSnapshot, CommerceError>
    where
        B: Serialize + ?Sized,
    {
        let envelope: CartEnvelope = self.post_json(path, body).await?;

        if !envelope.success {
            return Err(CommerceError::Rejected {
                status: envelope.status,
                message: envelope.message.unwrap_or_else(|| "no message".to_string()),
            });
        }

        let payload = envelope.data.ok_or(CommerceError::Rejected {
            status: envelope.status,
            message: "successful response carried no cart data".to_string(),
        })?;

        // Every successful cart call overwrites the persisted token,
        // reads included.
        self.inner.tokens.set(&payload.cart_id);

        Ok(convert_cart(payload))
    }
}

impl CommerceApi for CommerceClient {
    #[instrument(skip(self))]
    async fn get_cart(&self) -> Result<CartSnapshot, CommerceError> {
        // No token means no cart yet; answering locally avoids a mutating
        // call that would create a server-side session as a side effect.
        let Some(token) = self.token() else {
            return Ok(CartSnapshot::empty());
        };

        self.cart_call(
            "cart",
            &CartBody {
                cart_id: Some(&token),
            },
        )
        .await
    }

    #[instrument(skip(self), fields(sku = %sku, quantity))]
    async fn add_to_cart(&self, sku: &Sku, quantity: u32) -> Result<CartSnapshot, CommerceError> {
        if quantity == 0 {
            return Err(CommerceError::Validation(
                "quantity must be a positive integer".to_string(),
            ));
        }

        let token = self.token();
        self.cart_call(
            "cart/add",
            &CartLineBody {
                sku: sku.as_str(),
                quantity,
                cart_id: token.as_deref(),
            },
        )
        .await
    }

    #[instrument(skip(self), fields(sku = %sku, quantity))]
    async fn update_cart(&self, sku: &Sku, quantity: u32) -> Result<CartSnapshot, CommerceError> {
        if quantity == 0 {
            return Err(CommerceError::Validation(
                "quantity must be at least 1; use remove_from_cart to delete a line".to_string(),
            ));
        }

        let token = self.token();
        self.cart_call(
            "cart/update",
            &CartLineBody {
                sku: sku.as_str(),
                quantity,
                cart_id: token.as_deref(),
            },
        )
        .await
    }

    #[instrument(skip(self), fields(sku = %sku))]
    async fn remove_from_cart(&self, sku: &Sku) -> Result<CartSnapshot, CommerceError> {
        let token = self.token();
        self.cart_call(
            "cart/remove",
            &RemoveLineBody {
                sku: sku.as_str(),
                cart_id: token.as_deref(),
            },
        )
        .await
    }

    #[instrument(skip(self))]
    async fn clear_cart(&self) -> Result<(), CommerceError> {
        let token = self.token();
        let envelope: ClearEnvelope = self
            .post_json(
                "cart/clear",
                &CartBody {
                    cart_id: token.as_deref(),
                },
            )
            .await?;

        if !envelope.success {
            return Err(CommerceError::Rejected {
                status: envelope.status,
                message: envelope.message.unwrap_or_else(|| "no message".to_string()),
            });
        }

        self.inner.tokens.clear();
        Ok(())
    }

    #[instrument(skip(self, order))]
    async fn create_order(&self, order: &OrderRequest) -> Result<OrderResult, CommerceError> {
        let envelope: OrderEnvelope = self.post_json("order/create", order).await?;

        if !envelope.success {
            error!(
                status = envelope.status,
                message = envelope.message.as_deref().unwrap_or("no message"),
                "backend rejected order submission"
            );
            return Err(CommerceError::Submission {
                status: envelope.status,
                message: envelope.message.unwrap_or_else(|| "no message".to_string()),
            });
        }

        envelope.data.ok_or(CommerceError::Submission {
            status: envelope.status,
            message: "successful response carried no order data".to_string(),
        })
    }
}
